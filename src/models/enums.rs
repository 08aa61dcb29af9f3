use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same strings, so wire and storage forms agree.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub const ALL: &'static [$name] = &[$(Self::$variant),+];
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(ProviderScope {
    Emr => "EMR",
    Emt => "EMT",
    Aemt => "AEMT",
    Paramedic => "Paramedic",
});

str_enum!(QuestionKind {
    MultipleChoice => "multiple-choice",
    MultipleResponse => "multiple-response",
    BuildList => "build-list",
    ClinicalJudgment => "clinical-judgment",
});

str_enum!(InteractionSeverity {
    Major => "major",
    Moderate => "moderate",
    Minor => "minor",
});

str_enum!(AgeGroup {
    Adult => "adult",
    Pediatric => "pediatric",
    AdultPediatric => "adult_pediatric",
});

str_enum!(BurnAgeGroup {
    Adult => "adult",
    Child => "child",
    Infant => "infant",
});
