//! Helper macro generating port error enums with snake_case constructors.

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
    //! Regression coverage for this module.
    define_port_error! {
        pub enum UploadPortError {
            Rejected { reason: String } => "upload rejected: {reason}",
            TooLarge { bytes: u64 } => "upload too large: {bytes}",
            Partial { path: String, bytes: u64 } => "partial write to {path} ({bytes} bytes)",
            Closed => "upload channel closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = UploadPortError::rejected("empty body");
        assert_eq!(err.to_string(), "upload rejected: empty body");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = UploadPortError::too_large(42_u64);
        assert_eq!(err.to_string(), "upload too large: 42");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = UploadPortError::partial("/srv/specs/a", 7_u64);
        assert_eq!(err.to_string(), "partial write to /srv/specs/a (7 bytes)");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(UploadPortError::closed(), UploadPortError::Closed);
    }
}
