//! Helper macro generating port error enums with `impl Into` constructors.
//!
//! Each variant gets a snake_case constructor, so adapters write
//! `GuestRepositoryError::transport(err.to_string())` instead of spelling out
//! the struct literal.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ProbePortError {
            Unconfigured => "collaborator is not configured",
            Upstream { status: u16, message: String } => "upstream returned {status}: {message}",
            Transport { message: String } => "transport failed: {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(
            ProbePortError::unconfigured().to_string(),
            "collaborator is not configured"
        );
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbePortError::transport("connection reset");
        assert_eq!(err.to_string(), "transport failed: connection reset");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = ProbePortError::upstream(503_u16, "maintenance");
        assert_eq!(
            err,
            ProbePortError::Upstream {
                status: 503,
                message: "maintenance".to_owned(),
            }
        );
    }
}
