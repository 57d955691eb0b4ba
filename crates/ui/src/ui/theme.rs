//! Grey palette for the player window.

pub const BACKGROUND: u32 = 0x212121;
pub const SURFACE: u32 = 0x424242;
pub const SURFACE_ACTIVE: u32 = 0x757575;
pub const SURFACE_HOVER: u32 = 0x616161;
pub const FOREGROUND: u32 = 0xffffff;
pub const FOREGROUND_MUTED: u32 = 0x9e9e9e;
pub const ACCENT: u32 = 0x64b5f6;
pub const CLOSE_HOVER: u32 = 0xc62828;
