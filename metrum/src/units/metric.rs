//! Metric pressure units outside SI.

use metrum_core::{Decimal, TransitionRule};

use super::{unit, UnitDefinition};

/// Bar, technical atmosphere, standard atmosphere and millimetre of mercury, all in pascals.
pub fn other_metric_units() -> Vec<UnitDefinition> {
    vec![
        ("bar", TransitionRule::new(Decimal::new(1.0, 5), vec![unit("Pa")])),
        ("at", TransitionRule::new(98_066.5, vec![unit("Pa")])),
        ("atm", TransitionRule::new(101_325.0, vec![unit("Pa")])),
        ("mmHg", TransitionRule::new(133.322_387_415, vec![unit("Pa")])),
    ]
}
