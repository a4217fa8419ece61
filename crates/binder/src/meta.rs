//! Per-field model metadata — the seam where a derive/reflection mechanism
//! plugs in. The binder works identically with hand-written metadata.

/// Metadata for one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared field name.
    pub name: &'static str,
    /// Acceptable source key aliases, tried in order against the raw object
    /// when the translated name misses (decode side).
    pub aliases: &'static [&'static str],
    /// Output key override; when absent, the declared name goes through the
    /// active key strategy (encode side).
    pub rename: Option<&'static str>,
}

impl FieldMeta {
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            rename: None,
        }
    }
}

/// A type with a declared, ordered field list.
pub trait Model: Sized {
    fn fields() -> &'static [FieldMeta];
}

/// Declares a model struct and implements [`Model`], [`crate::FromNode`],
/// and [`crate::ToNode`] for it.
///
/// Per-field options follow the type behind `=>`: `aliases` lists
/// alternate source keys tried in order on decode, `rename` overrides the
/// output key on encode (`aliases` comes first when both are given).
///
/// ```
/// use json_bind::{model, Strategies};
///
/// model! {
///     #[derive(Debug, PartialEq)]
///     pub struct Account {
///         pub id: u64,
///         pub owner: String => { aliases: ["user", "holder"] },
///         pub balance: f64 => { rename: "balance_usd" },
///     }
/// }
///
/// let account: Account = json_bind::from_str(
///     r#"{"id": 1, "holder": "ada", "balance": 10.5}"#,
///     &Strategies::new(),
/// ).unwrap();
/// assert_eq!(account.owner, "ada");
///
/// let out = json_bind::to_value(&account, &Strategies::new()).unwrap();
/// assert_eq!(out["balance_usd"], 10.5);
/// ```
#[macro_export]
macro_rules! model {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fattr:meta])*
                $fvis:vis $fname:ident : $fty:ty $(=> { $($opts:tt)* })?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $( $(#[$fattr])* $fvis $fname : $fty, )*
        }

        impl $crate::Model for $name {
            fn fields() -> &'static [$crate::FieldMeta] {
                const FIELDS: &[$crate::FieldMeta] = &[
                    $(
                        $crate::FieldMeta {
                            name: stringify!($fname),
                            aliases: $crate::model!(@aliases $($($opts)*)?),
                            rename: $crate::model!(@rename $($($opts)*)?),
                        },
                    )*
                ];
                FIELDS
            }
        }

        impl $crate::FromNode for $name {
            fn from_node(
                binder: &mut $crate::DecodeBinder<'_>,
                node: &$crate::Node,
            ) -> Result<Self, $crate::BindError> {
                #[allow(unused_mut, unused_variables)]
                let mut keyed = binder.keyed(node)?;
                Ok(Self {
                    $(
                        $fname: keyed.field(&$crate::FieldMeta {
                            name: stringify!($fname),
                            aliases: $crate::model!(@aliases $($($opts)*)?),
                            rename: $crate::model!(@rename $($($opts)*)?),
                        })?,
                    )*
                })
            }
        }

        impl $crate::ToNode for $name {
            fn to_node(
                &self,
                binder: &mut $crate::EncodeBinder<'_>,
            ) -> Result<$crate::Node, $crate::BindError> {
                #[allow(unused_mut)]
                let mut keyed = binder.keyed();
                $(
                    keyed.field(
                        &$crate::FieldMeta {
                            name: stringify!($fname),
                            aliases: $crate::model!(@aliases $($($opts)*)?),
                            rename: $crate::model!(@rename $($($opts)*)?),
                        },
                        &self.$fname,
                    )?;
                )*
                Ok(keyed.finish())
            }
        }
    };

    (@aliases) => { &[] };
    (@aliases aliases: [$($a:literal),* $(,)?] $(, rename: $r:literal)? $(,)?) => { &[$($a),*] };
    (@aliases rename: $r:literal $(,)?) => { &[] };
    (@rename) => { None };
    (@rename aliases: [$($a:literal),* $(,)?], rename: $r:literal $(,)?) => { Some($r) };
    (@rename aliases: [$($a:literal),* $(,)?] $(,)?) => { None };
    (@rename rename: $r:literal $(,)?) => { Some($r) };
}
