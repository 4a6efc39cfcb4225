#![allow(dead_code)]

pub mod faulty_kernel;
pub mod graphs;
pub mod virtual_network;
