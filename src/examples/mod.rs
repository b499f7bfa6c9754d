//! Worked example problems, kept as library modules so their tests double
//! as end-to-end coverage of the solver.

pub mod map_colouring;
