//! Imperial lengths and areas.
//!
//! International definitions: the inch is **exactly** `25.4 mm`, and every other length here is an exact multiple
//! of it. The nautical mile here (`M`, `NM`, `nmi`) is ten cables of 600 ft, not the international `1852 m`.

use metrum_core::{MetricPrefix, TransitionRule};

use super::{power, prefixed, unit, UnitDefinition};

/// Imperial units. None of them accepts a metric prefix.
pub fn imperial_units() -> Vec<UnitDefinition> {
    vec![
        // Lengths
        ("th", TransitionRule::new(25.4, vec![prefixed(MetricPrefix::Micro, "m")])),
        ("in", TransitionRule::new(25.4, vec![prefixed(MetricPrefix::Milli, "m")])),
        ("ft", TransitionRule::new(304.8, vec![prefixed(MetricPrefix::Milli, "m")])),
        ("yd", TransitionRule::new(914.4, vec![prefixed(MetricPrefix::Milli, "m")])),
        ("ch", TransitionRule::new(20.1168, vec![unit("m")])),
        ("fur", TransitionRule::new(201.168, vec![unit("m")])),
        ("mi", TransitionRule::new(1_609.344, vec![unit("m")])),
        ("lea", TransitionRule::new(4_828.032, vec![unit("m")])),
        // Maritime
        ("ftm", TransitionRule::new(1.8288, vec![unit("m")])),
        ("cable", TransitionRule::new(182.88, vec![unit("m")])),
        ("M", TransitionRule::new(1_828.8, vec![unit("m")])),
        ("NM", TransitionRule::alias(vec![unit("M")])),
        ("nmi", TransitionRule::alias(vec![unit("M")])),
        // Gunter's survey
        ("link", TransitionRule::new(0.201_168, vec![unit("m")])),
        ("rod", TransitionRule::new(5.0292, vec![unit("m")])),
        // Areas
        ("perch", TransitionRule::new(25.292_852_64, vec![power("m", 2)])),
        ("rood", TransitionRule::new(1_011.714_105_6, vec![power("m", 2)])),
        ("acre", TransitionRule::new(4_046.856_422_4, vec![power("m", 2)])),
    ]
}
