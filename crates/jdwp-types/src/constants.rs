//! constants

use crate::macros::constant_enum;
use bitfield::bitfield;

constant_enum! {
    /// An error constant, as reported by the target VM for a failed reference type query
    #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
    pub enum ErrorConstant: u16 {
        /// No error has occurred.
        None = 0,
        /// If this reference type has been unloaded and garbage collected.
        InvalidObject = 20,
        /// Invalid class.
        InvalidClass = 21,
        /// Class has been loaded but not yet prepared.
        ClassNotPrepared = 22,
        /// Invalid field.
        InvalidFieldId = 25,
        /// Desired element not found.
        NotFound = 41,
        /// The functionality is not implemented in this virtual machine.
        NotImplemented = 99,
        /// Invalid pointer.
        NullPointer = 100,
        /// Desired information is not available.
        AbsentInformation = 101,
        /// Illegal argument.
        IllegalArgument = 103,
        /// The function needed to allocate memory and no more memory was available for allocation.
        OutOfMemory = 110,
        /// The virtual machine is not running.
        VmDead = 112,
        /// An unexpected internal error has occurred.
        Internal = 113,
        /// The class loader is invalid.
        InvalidClassLoader = 507,
    }
}

constant_enum! {
    /// A tag for a certain reference type
    #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
    pub enum TypeTag: u8 {
        /// ReferenceType is a class.
        Class = 1,
        /// ReferenceType is an interface.
        Interface = 2,
        /// Reference type is an array.
        Array = 3
    }
}

constant_enum! {
    /// A tag for a certain type. The value of each tag is also the marker character that starts the
    /// matching type descriptor.
    #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
    pub enum Tag: u8 {
        /// '[' - an array object (objectID size).
        Array = 91,
        /// 'B' - a byte value (1 byte).
        Byte = 66,
        /// 'C' - a character value (2 bytes).
        Char = 67,
        /// 'L' - an object (objectID size).
        Object = 76,
        /// 'F' - a float value (4 bytes).
        Float = 70,
        /// 'D' - a double value (8 bytes).
        Double = 68,
        /// 'I' - an int value (4 bytes).
        Int = 73,
        /// 'J' - a long value (8 bytes).
        Long = 74,
        /// 'S' - a short value (2 bytes).
        Short = 83,
        /// 'V' - a void value (no bytes).
        Void = 86,
        /// 'Z' - a boolean value (1 byte).
        Boolean = 90,
        /// 's' - a String object (objectID size).
        String = 115,
        /// 't' - a Thread object (objectID size).
        Thread = 116,
        /// 'g' - a ThreadGroup object (objectID size).
        ThreadGroup = 103,
        /// 'l' - a ClassLoader object (objectID size).
        ClassLoader = 108,
        /// 'c' - a class object object (objectID size).
        ClassObject = 99,
    }
}

impl Tag {
    /// Gets the tag whose marker is the given character
    pub fn from_marker(marker: char) -> Option<Self> {
        u8::try_from(marker)
            .ok()
            .and_then(|byte| Tag::try_from(byte).ok())
    }

    /// The character this tag is written as
    pub const fn marker(self) -> char {
        self.value() as char
    }

    /// The source-level keyword of a primitive tag, `None` for every object tag
    pub const fn keyword(self) -> Option<&'static str> {
        let keyword = match self {
            Tag::Byte => "byte",
            Tag::Char => "char",
            Tag::Float => "float",
            Tag::Double => "double",
            Tag::Int => "int",
            Tag::Long => "long",
            Tag::Short => "short",
            Tag::Void => "void",
            Tag::Boolean => "boolean",
            _ => return None,
        };
        Some(keyword)
    }

    /// Whether this tag denotes a primitive value (or void)
    pub const fn is_primitive(self) -> bool {
        self.keyword().is_some()
    }
}

bitfield! {
    /// Access flags of a field, method or class, using the class file encoding. JDWP reports
    /// synthetic members with the `0xf0000000` bits set.
    #[derive(Clone, Copy, Eq, PartialEq, Hash)]
    pub struct Modifiers(u32);
    impl Debug;

    /// `ACC_PUBLIC`
    pub is_public, _: 0;
    /// `ACC_PRIVATE`
    pub is_private, _: 1;
    /// `ACC_PROTECTED`
    pub is_protected, _: 2;
    /// `ACC_STATIC`
    pub is_static, _: 3;
    /// `ACC_FINAL`
    pub is_final, _: 4;
    /// `ACC_VOLATILE`, fields only
    pub is_volatile, _: 6;
    /// `ACC_TRANSIENT`, fields only
    pub is_transient, _: 7;
    /// Synthetic, the lowest of the bits JDWP sets for synthetic members
    pub is_synthetic, _: 28;
}

impl Modifiers {
    /// `ACC_STATIC`
    pub const STATIC: u32 = 0x0008;
    /// `ACC_FINAL`
    pub const FINAL: u32 = 0x0010;
    /// Synthetic, as reported by JDWP
    pub const SYNTHETIC: u32 = 0xf000_0000;

    /// Creates modifiers from their raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Gets the raw bits
    pub const fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self(0)
    }
}
