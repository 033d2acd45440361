/// Declares a fieldless enum whose variants are JDWP constants of the given width.
///
/// ```text
/// constant_enum! {
///     pub enum TypeTag: u8 {
///         Class = 1,
///     }
/// }
/// ```
///
/// Besides the enum this generates `ALL`, every variant in declaration order, a `const fn value()`, and
/// conversions to and from the raw value. Converting an unknown value fails with an
/// [UnknownTagError](crate::UnknownTagError). The enum must be `Copy`.
macro_rules! constant_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident: $repr:ty {
            $(
                $(#[$variant_attr:meta])*
                $variant:ident = $raw:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[repr($repr)]
        $vis enum $name {
            $(
                $(#[$variant_attr])*
                $variant = $raw,
            )+
        }

        impl $name {
            /// Every constant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The raw value sent over the wire
            pub const fn value(self) -> $repr {
                self as $repr
            }
        }

        impl From<$name> for $repr {
            fn from(constant: $name) -> Self {
                constant.value()
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = $crate::UnknownTagError<$repr>;

            fn try_from(raw: $repr) -> Result<Self, Self::Error> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|constant| constant.value() == raw)
                    .ok_or($crate::UnknownTagError(raw))
            }
        }
    };
}

pub(crate) use constant_enum;
