// Tue Jan 13 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protection {
    None = 0,
    Read = 1,
    Write = 2,
    Execute = 4,
    ReadWrite = 3,
    ReadExecute = 5,
    WriteExecute = 6,
    ReadWriteExecute = 7,
}

impl Protection {
    pub fn from_flags(flags: u32) -> Self {
        match flags & 7 {
            1 => Self::Read,
            2 => Self::Write,
            3 => Self::ReadWrite,
            4 => Self::Execute,
            5 => Self::ReadExecute,
            6 => Self::WriteExecute,
            7 => Self::ReadWriteExecute,
            _ => Self::None,
        }
    }

    /// Parses the `rwxp` column of `/proc/<pid>/maps`.
    pub fn from_maps_perms(perms: &str) -> Self {
        let bytes = perms.as_bytes();
        let mut flags = 0;
        if bytes.first() == Some(&b'r') {
            flags |= 1;
        }
        if bytes.get(1) == Some(&b'w') {
            flags |= 2;
        }
        if bytes.get(2) == Some(&b'x') {
            flags |= 4;
        }
        Self::from_flags(flags)
    }

    /// Maps ELF `p_flags` (PF_X = 1, PF_W = 2, PF_R = 4) onto our bit order.
    pub fn from_elf_flags(p_flags: u32) -> Self {
        let mut flags = 0;
        if p_flags & 4 != 0 {
            flags |= 1;
        }
        if p_flags & 2 != 0 {
            flags |= 2;
        }
        if p_flags & 1 != 0 {
            flags |= 4;
        }
        Self::from_flags(flags)
    }

    pub fn to_flags(self) -> u32 {
        self as u32
    }

    pub fn can_read(self) -> bool {
        self.to_flags() & 1 != 0
    }

    pub fn can_write(self) -> bool {
        self.to_flags() & 2 != 0
    }

    pub fn can_execute(self) -> bool {
        self.to_flags() & 4 != 0
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = if self.can_read() { 'r' } else { '-' };
        let w = if self.can_write() { 'w' } else { '-' };
        let x = if self.can_execute() { 'x' } else { '-' };
        write!(f, "{}{}{}", r, w, x)
    }
}
