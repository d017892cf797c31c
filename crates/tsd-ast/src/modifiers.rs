//! Declaration modifier flags.

use bitflags::bitflags;

bitflags! {
    /// Modifiers attached to a declaration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const EXPORT = 1 << 0;
        const AMBIENT = 1 << 1;
        const PUBLIC = 1 << 2;
        const PRIVATE = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const ABSTRACT = 1 << 7;
        const ASYNC = 1 << 8;
        const DEFAULT = 1 << 9;
        const CONST = 1 << 10;
        const OVERRIDE = 1 << 11;

        const ACCESSIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        /// Modifiers that carry no information in a declaration file.
        const ELIDED_IN_DECLARATIONS =
            Self::PUBLIC.bits() | Self::ASYNC.bits() | Self::OVERRIDE.bits();
    }
}

impl ModifierFlags {
    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.contains(ModifierFlags::EXPORT)
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.contains(ModifierFlags::PRIVATE)
    }

    /// Keyword spelling order for printing: `export` `default` `declare`
    /// accessibility `static` `abstract` `override` `readonly` `async` `const`.
    #[must_use]
    pub fn keywords(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(ModifierFlags::EXPORT) {
            out.push("export");
        }
        if self.contains(ModifierFlags::DEFAULT) {
            out.push("default");
        }
        if self.contains(ModifierFlags::AMBIENT) {
            out.push("declare");
        }
        if self.contains(ModifierFlags::PUBLIC) {
            out.push("public");
        }
        if self.contains(ModifierFlags::PRIVATE) {
            out.push("private");
        }
        if self.contains(ModifierFlags::PROTECTED) {
            out.push("protected");
        }
        if self.contains(ModifierFlags::STATIC) {
            out.push("static");
        }
        if self.contains(ModifierFlags::ABSTRACT) {
            out.push("abstract");
        }
        if self.contains(ModifierFlags::OVERRIDE) {
            out.push("override");
        }
        if self.contains(ModifierFlags::READONLY) {
            out.push("readonly");
        }
        if self.contains(ModifierFlags::ASYNC) {
            out.push("async");
        }
        if self.contains(ModifierFlags::CONST) {
            out.push("const");
        }
        out
    }
}
