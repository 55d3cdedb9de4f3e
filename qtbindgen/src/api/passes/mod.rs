pub mod anonymous_enums;
pub mod conversion_ops;
pub mod cross_module;
pub mod enum_access;
pub mod method_exclusions;
pub mod private_filter;
pub mod type_mapped;
pub mod value_types;
