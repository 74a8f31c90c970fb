#![allow(dead_code)]

pub mod loopback;
pub mod telepredict_env;
