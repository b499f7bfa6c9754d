pub mod assignment;
pub mod domain;
pub mod engine;
pub mod heuristics;
pub mod relation;
pub mod space;
pub mod value;
pub mod variable;
pub mod work_list;
