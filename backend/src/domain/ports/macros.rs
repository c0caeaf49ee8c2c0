//! `define_port_error!`: port error enums with `thiserror` messages and one
//! snake-case constructor per variant.
//!
//! Variants carry at most one field; its constructor takes `impl Into<T>` so
//! adapters can pass `&str` for `String` fields.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $field:ident : $ty:ty })? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $({ $field: $ty })?,
            )*
        }

        impl $name {
            $(define_port_error!(@constructor $variant $($field: $ty)?);)*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident $field:ident : $ty:ty) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                Self::$variant { $field: $field.into() }
            }
        }
    };
}

pub(crate) use define_port_error;
