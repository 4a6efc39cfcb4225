pub mod graph;
pub mod lsa;
pub mod path;
pub mod route;
