// SPDX-License-Identifier: GPL-3.0-only

//! Win32 virtual-key codes used by the shortcut actions.
//!
//! The widget only ever injects a handful of keys, all addressed by their
//! Win32 virtual-key (VK) code. The codes are carried in a newtype so that a
//! raw byte cannot be passed where a key is expected, and so that logs can
//! print a readable name for the keys we care about.

use std::fmt;

/// A Win32 virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualKey(pub u8);

impl VirtualKey {
    /// Left Windows (Meta) key.
    pub const LEFT_META: VirtualKey = VirtualKey(0x5B);
    /// Control key.
    pub const CONTROL: VirtualKey = VirtualKey(0x11);
    /// Alt key (VK_MENU).
    pub const ALT: VirtualKey = VirtualKey(0x12);
    /// The letter H (voice input chord).
    pub const H: VirtualKey = VirtualKey(0x48);
    /// The letter C (assistant chord).
    pub const C: VirtualKey = VirtualKey(0x43);
    /// The letter L (live captions chord).
    pub const L: VirtualKey = VirtualKey(0x4C);

    /// Returns the raw VK code.
    #[must_use]
    pub fn code(self) -> u8 {
        self.0
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            VirtualKey::LEFT_META => write!(f, "Meta"),
            VirtualKey::CONTROL => write!(f, "Ctrl"),
            VirtualKey::ALT => write!(f, "Alt"),
            VirtualKey(code @ 0x30..=0x39) | VirtualKey(code @ 0x41..=0x5A) => {
                // Digits and letters share their ASCII value
                write!(f, "{}", code as char)
            }
            VirtualKey(code) => write!(f, "VK(0x{code:02X})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test the VK code values the shortcut table depends on
    #[test]
    fn test_shortcut_key_codes() {
        assert_eq!(VirtualKey::LEFT_META.code(), 0x5B);
        assert_eq!(VirtualKey::CONTROL.code(), 0x11);
        assert_eq!(VirtualKey::ALT.code(), 0x12);
        assert_eq!(VirtualKey::H.code(), 0x48);
        assert_eq!(VirtualKey::C.code(), 0x43);
        assert_eq!(VirtualKey::L.code(), 0x4C);
    }

    /// Test readable names in log output
    #[test]
    fn test_display_names() {
        assert_eq!(VirtualKey::LEFT_META.to_string(), "Meta");
        assert_eq!(VirtualKey::CONTROL.to_string(), "Ctrl");
        assert_eq!(VirtualKey::C.to_string(), "C");
        assert_eq!(VirtualKey::H.to_string(), "H");
        assert_eq!(VirtualKey(0x30).to_string(), "0");
        assert_eq!(VirtualKey(0x07).to_string(), "VK(0x07)");
    }
}
