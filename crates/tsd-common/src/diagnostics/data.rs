//! Diagnostic message data for declaration emission.
//!
//! Codes follow tsc's numbering: 4000-series symbol-accessibility errors
//! (one template per container kind), 2500/2700-series unnameable
//! inferred-type errors, 9000-series isolated-declarations errors.

use super::{DiagnosticCategory, DiagnosticMessage};

macro_rules! messages {
    ($(($name:ident, $code:literal, $text:literal),)+) => {
        pub mod diagnostic_codes {
            $(pub const $name: u32 = $code;)+
            /// Every registered code, for table-integrity tests.
            pub const ALL: &[u32] = &[$($code,)+];
        }

        pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
            $(DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::Error,
                message: $text,
            },)+
        ];
    };
}

messages! {
    // Symbol accessibility, keyed by the referencing container.
    (IMPORT_PRIVATE_NAME, 4000,
        "Import declaration '{0}' is using private name '{1}'."),
    (CLASS_TYPE_PARAMETER_PRIVATE_NAME, 4002,
        "Type parameter '{0}' of exported class has or is using private name '{1}'."),
    (INTERFACE_TYPE_PARAMETER_PRIVATE_NAME, 4004,
        "Type parameter '{0}' of exported interface has or is using private name '{1}'."),
    (FUNCTION_TYPE_PARAMETER_PRIVATE_NAME, 4016,
        "Type parameter '{0}' of exported function has or is using private name '{1}'."),
    (CLASS_EXTENDS_PRIVATE_NAME, 4020,
        "'extends' clause of exported class '{0}' has or is using private name '{1}'."),
    (CLASS_IMPLEMENTS_PRIVATE_NAME, 4021,
        "'implements' clause of exported class '{0}' has or is using private name '{1}'."),
    (INTERFACE_EXTENDS_PRIVATE_NAME, 4022,
        "'extends' clause of exported interface '{0}' has or is using private name '{1}'."),
    (EXPORTED_VARIABLE_NAME_FROM_PRIVATE_MODULE, 4023,
        "Exported variable '{0}' has or is using name '{1}' from external module {2} but cannot be named."),
    (EXPORTED_VARIABLE_PRIVATE_NAME, 4025,
        "Exported variable '{0}' has or is using private name '{1}'."),
    (CLASS_STATIC_PROPERTY_PRIVATE_NAME, 4028,
        "Public static property '{0}' of exported class has or is using private name '{1}'."),
    (CLASS_PROPERTY_PRIVATE_NAME, 4031,
        "Public property '{0}' of exported class has or is using private name '{1}'."),
    (INTERFACE_PROPERTY_PRIVATE_NAME, 4032,
        "Property '{0}' of exported interface has or is using private name '{1}'."),
    (GETTER_RETURN_PRIVATE_NAME, 4043,
        "Return type of public getter '{0}' from exported class has or is using private name '{1}'."),
    (INDEX_SIGNATURE_RETURN_PRIVATE_NAME, 4046,
        "Return type of index signature from exported interface has or is using private name '{0}'."),
    (CALL_SIGNATURE_RETURN_PRIVATE_NAME, 4050,
        "Return type of call signature from exported interface has or is using private name '{0}'."),
    (CONSTRUCT_SIGNATURE_RETURN_PRIVATE_NAME, 4051,
        "Return type of constructor signature from exported interface has or is using private name '{0}'."),
    (STATIC_METHOD_RETURN_PRIVATE_NAME, 4053,
        "Return type of public static method from exported class has or is using private name '{0}'."),
    (METHOD_RETURN_PRIVATE_NAME, 4055,
        "Return type of public method from exported class has or is using private name '{0}'."),
    (INTERFACE_METHOD_RETURN_PRIVATE_NAME, 4057,
        "Return type of method from exported interface has or is using private name '{0}'."),
    (FUNCTION_RETURN_PRIVATE_NAME, 4060,
        "Return type of exported function has or is using private name '{0}'."),
    (CONSTRUCTOR_PARAMETER_PRIVATE_NAME, 4063,
        "Parameter '{0}' of constructor from exported class has or is using private name '{1}'."),
    (METHOD_PARAMETER_PRIVATE_NAME, 4073,
        "Parameter '{0}' of public method from exported class has or is using private name '{1}'."),
    (INTERFACE_METHOD_PARAMETER_PRIVATE_NAME, 4075,
        "Parameter '{0}' of method from exported interface has or is using private name '{1}'."),
    (FUNCTION_PARAMETER_PRIVATE_NAME, 4076,
        "Parameter '{0}' of exported function has or is using private name '{1}'."),
    (EXPORTED_TYPE_ALIAS_PRIVATE_NAME, 4081,
        "Exported type alias '{0}' has or is using private name '{1}'."),
    (DEFAULT_EXPORT_PRIVATE_NAME, 4082,
        "Default export of the module has or is using private name '{0}'."),
    (TYPE_ALIAS_TYPE_PARAMETER_PRIVATE_NAME, 4083,
        "Type parameter '{0}' of exported type alias has or is using private name '{1}'."),

    // Unnameable inferred types.
    (INFERRED_TYPE_INACCESSIBLE_UNIQUE_SYMBOL, 2527,
        "The inferred type of '{0}' references an inaccessible 'unique symbol' type. A type annotation is necessary."),
    (INFERRED_TYPE_INACCESSIBLE_THIS, 2528,
        "The inferred type of '{0}' references an inaccessible 'this' type. A type annotation is necessary."),
    (INFERRED_TYPE_CYCLIC, 2615,
        "Type of '{0}' cannot be determined because it references itself directly or indirectly."),
    (INFERRED_TYPE_NOT_PORTABLE, 2742,
        "The inferred type of '{0}' cannot be named without a reference to '{1}'. This is likely not portable. A type annotation is necessary."),
    (RESOLUTION_MODE_ASSERTION_UNSTABLE, 4125,
        "'resolution-mode' assertions are unstable. Use nightly TypeScript to silence this error."),
    (EMIT_REQUIRES_PRIVATE_NAME, 9005,
        "Declaration emit for this file requires using private name '{0}'. An explicit type annotation may unblock declaration emit."),
    (EMIT_REQUIRES_PRIVATE_NAME_FROM_MODULE, 9006,
        "Declaration emit for this file requires using private name '{0}' from module '{1}'. An explicit type annotation may unblock declaration emit."),

    // Isolated declarations.
    (ISOLATED_FUNCTION_NEEDS_RETURN_TYPE, 9007,
        "Function must have an explicit return type annotation with --isolatedDeclarations."),
    (ISOLATED_METHOD_NEEDS_RETURN_TYPE, 9008,
        "Method must have an explicit return type annotation with --isolatedDeclarations."),
    (ISOLATED_ACCESSOR_NEEDS_TYPE, 9009,
        "At least one accessor must have an explicit return type annotation with --isolatedDeclarations."),
    (ISOLATED_VARIABLE_NEEDS_TYPE, 9010,
        "Variable must have an explicit type annotation with --isolatedDeclarations."),
    (ISOLATED_PARAMETER_NEEDS_TYPE, 9011,
        "Parameter must have an explicit type annotation with --isolatedDeclarations."),
    (ISOLATED_PROPERTY_NEEDS_TYPE, 9012,
        "Property must have an explicit type annotation with --isolatedDeclarations."),
    (ISOLATED_EXPRESSION_NOT_INFERABLE, 9013,
        "Expression type can't be inferred with --isolatedDeclarations."),
    (ISOLATED_OBJECT_SPREAD, 9015,
        "Objects that contain spread assignments can't be inferred with --isolatedDeclarations."),
    (ISOLATED_OBJECT_SHORTHAND, 9016,
        "Objects that contain shorthand properties can't be inferred with --isolatedDeclarations."),
    (ISOLATED_ARRAY_SPREAD, 9018,
        "Arrays with spread elements can't be inferred with --isolatedDeclarations."),
    (ISOLATED_BINDING_ELEMENT_EXPORT, 9019,
        "Binding elements can't be exported directly with --isolatedDeclarations."),
    (ISOLATED_ENUM_MEMBER_NOT_COMPUTABLE, 9020,
        "Enum member initializers must be computable without references to external symbols with --isolatedDeclarations."),
    (ISOLATED_EXTENDS_EXPRESSION, 9021,
        "Extends clause can't contain an expression with --isolatedDeclarations."),
    (ISOLATED_CLASS_EXPRESSION, 9022,
        "Inference from class expressions is not supported with --isolatedDeclarations."),
    (ISOLATED_EXPANDO_FUNCTION, 9023,
        "Assigning properties to functions without declaring them is not supported with --isolatedDeclarations."),
    (ISOLATED_COMPUTED_PROPERTY_NAME, 9038,
        "Computed property names on class or object literals cannot be inferred with --isolatedDeclarations."),
}
