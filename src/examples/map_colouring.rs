//! Map colouring over a fragment of the Australian states: adjacent regions
//! must not share a colour. A classic small CSP, expressed here as pairwise
//! not-equal relations over an enum value type.

use crate::{
    error::Result,
    solver::{
        domain::Domain,
        relation::Relation,
        variable::{Variable, VariableRegistry},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    Red,
    Green,
    Blue,
}

pub struct MapColouringProblem {
    pub regions: Vec<Variable<Colour>>,
    pub relations: Vec<Relation<Colour>>,
}

/// Builds the problem: four regions, five adjacencies, three colours.
pub fn australia_fragment() -> Result<MapColouringProblem> {
    let palette = Domain::discrete([Colour::Red, Colour::Green, Colour::Blue]);

    let mut registry = VariableRegistry::new();
    let wa = registry.variable("wa", palette.clone())?;
    let nt = registry.variable("nt", palette.clone())?;
    let sa = registry.variable("sa", palette.clone())?;
    let q = registry.variable("q", palette)?;

    let adjacent = [
        (wa.clone(), nt.clone()),
        (wa.clone(), sa.clone()),
        (nt.clone(), sa.clone()),
        (nt.clone(), q.clone()),
        (sa.clone(), q.clone()),
    ];
    let relations = adjacent
        .into_iter()
        .map(|(a, b)| Relation::new([a, b], |v: &[Colour]| v[0] != v[1]))
        .collect();

    Ok(MapColouringProblem {
        regions: vec![wa, nt, sa, q],
        relations,
    })
}
