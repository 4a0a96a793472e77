// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryReader, MemoryRegion, Protection};
use libc::pid_t;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static MAPS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^([0-9a-fA-F]+)-([0-9a-fA-F]+)\s+([rwxsp-]{4})\s+",
        r"([0-9a-fA-F]+)\s+\S+\s+\d+\s*(.*)$"
    ))
    .expect("maps line regex is valid")
});

/// A live process on Linux / Android, read through `process_vm_readv`.
pub struct ProcessMemory {
    pid: pid_t,
}

impl ProcessMemory {
    pub fn attach(pid: pid_t) -> Result<Self, MemoryError> {
        if !Path::new(&format!("/proc/{}", pid)).exists() {
            return Err(MemoryError::ProcessNotFound(format!("no such pid {}", pid)));
        }
        debug!("attached to pid {}", pid);
        Ok(Self { pid })
    }

    pub fn attach_by_name(name: &str) -> Result<Self, MemoryError> {
        match Self::find_pid_by_name(name)? {
            Some(pid) => Self::attach(pid),
            None => Err(MemoryError::ProcessNotFound(format!("Process '{}' not found", name))),
        }
    }

    /// Looks for a process whose `cmdline` (first argument) is exactly `name`.
    /// Android app processes report their package name there.
    pub fn find_pid_by_name(name: &str) -> Result<Option<pid_t>, MemoryError> {
        for entry in fs::read_dir("/proc")? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let pid: pid_t = match entry.file_name().to_str().and_then(|s| s.parse().ok()) {
                Some(pid) => pid,
                None => continue,
            };
            if cmdline_name(&entry.path()).as_deref() == Some(name) {
                trace!("matched {} -> pid {}", name, pid);
                return Ok(Some(pid));
            }
        }
        Ok(None)
    }

    /// First `cmdline` argument, the package name for app processes.
    pub fn process_name(&self) -> Option<String> {
        cmdline_name(Path::new(&format!("/proc/{}", self.pid)))
    }

    pub fn enumerate_regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        let contents = fs::read_to_string(format!("/proc/{}/maps", self.pid))?;
        parse_maps(&contents)
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn read_remote(&self, addr: Address, buf: &mut [u8]) -> Result<usize, MemoryError> {
        let local = libc::iovec {
            iov_base: buf.as_mut_ptr() as *mut libc::c_void,
            iov_len: buf.len(),
        };
        let remote = libc::iovec {
            iov_base: addr.as_u64() as *mut libc::c_void,
            iov_len: buf.len(),
        };
        let read = unsafe { libc::process_vm_readv(self.pid, &local, 1, &remote, 1, 0) };
        if read < 0 {
            return Err(MemoryError::ReadFailed(addr.as_u64()));
        }
        Ok(read as usize)
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn read_remote(&self, addr: Address, _buf: &mut [u8]) -> Result<usize, MemoryError> {
        Err(MemoryError::ReadFailed(addr.as_u64()))
    }
}

impl MemoryReader for ProcessMemory {
    fn read_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        if buf.is_empty() {
            return Ok(());
        }
        let got = self.read_remote(addr, buf)?;
        if got != buf.len() {
            return Err(MemoryError::ShortRead {
                addr: addr.as_u64(),
                wanted: buf.len(),
                got,
            });
        }
        Ok(())
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        self.enumerate_regions()
    }
}

fn cmdline_name(proc_dir: &Path) -> Option<String> {
    let cmdline = fs::read(proc_dir.join("cmdline")).ok()?;
    let first = cmdline.split(|&b| b == 0).next()?;
    if first.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(first).into_owned())
}

/// Parses the text of `/proc/<pid>/maps`. Blank lines are skipped; anything else that does not
/// look like a mapping is an error.
pub fn parse_maps(contents: &str) -> Result<Vec<MemoryRegion>, MemoryError> {
    let mut regions = Vec::new();

    for line in contents.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let caps = MAPS_LINE
            .captures(line)
            .ok_or_else(|| MemoryError::MalformedMapsLine(line.to_string()))?;

        let parse_hex = |idx: usize| {
            u64::from_str_radix(&caps[idx], 16)
                .map_err(|_| MemoryError::MalformedMapsLine(line.to_string()))
        };

        let start = parse_hex(1)?;
        let end = parse_hex(2)?;
        let offset = parse_hex(4)?;
        let protection = Protection::from_maps_perms(&caps[3]);

        let range = MemoryRange::new(Address::new(start), Address::new(end));
        let mut region = MemoryRegion::new(range, protection).with_offset(offset);

        let path = caps[5].trim();
        if !path.is_empty() {
            region = region.with_path(path);
        }

        regions.push(region);
    }

    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
7a1c000000-7a1c400000 r--p 00000000 fd:05 1234    /data/app/com.proximabeta.mf.uamo/lib/arm64/libUE4.so
7a1c400000-7a1f800000 r-xp 00400000 fd:05 1234    /data/app/com.proximabeta.mf.uamo/lib/arm64/libUE4.so
7a1f800000-7a1f900000 rw-p 03800000 fd:05 1234    /data/app/com.proximabeta.mf.uamo/lib/arm64/libUE4.so
7a20000000-7a20021000 rw-p 00000000 00:00 0       [anon:libc_malloc]
7a20021000-7a20022000 ---p 00000000 00:00 0
";

    #[test]
    fn test_parse_maps() {
        let regions = parse_maps(SAMPLE).unwrap();
        assert_eq!(regions.len(), 5);

        let text = &regions[1];
        assert_eq!(text.start(), Address::new(0x7a1c400000));
        assert_eq!(text.end(), Address::new(0x7a1f800000));
        assert_eq!(text.protection(), Protection::ReadExecute);
        assert_eq!(text.offset(), 0x400000);
        assert_eq!(text.file_name(), Some("libUE4.so"));

        assert_eq!(regions[3].path(), Some("[anon:libc_malloc]"));
        assert_eq!(regions[4].path(), None);
        assert_eq!(regions[4].protection(), Protection::None);
    }

    #[test]
    fn test_parse_maps_rejects_garbage() {
        let err = parse_maps("not a maps line\n").unwrap_err();
        assert!(matches!(err, MemoryError::MalformedMapsLine(_)));
    }

    #[test]
    fn test_attach_missing_pid() {
        assert!(ProcessMemory::attach(-1).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_attach_self() {
        let me = ProcessMemory::attach(std::process::id() as pid_t).unwrap();
        assert!(me.process_name().is_some());
        assert!(!me.enumerate_regions().unwrap().is_empty());
    }
}
