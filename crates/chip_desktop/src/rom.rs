use std::{fs, path::Path};

use chip_core::{globals::MAX_ROM_SIZE, LoadError};
use log::error;

/// Reads a raw ROM image. The file is the program verbatim, no header.
pub fn read_rom(path: &Path) -> Result<Vec<u8>, LoadError> {
    let data = fs::read(path).map_err(|e| {
        error!("could not read {}: {}", path.display(), e);
        LoadError::RomUnreadable
    })?;
    if data.len() > MAX_ROM_SIZE {
        return Err(LoadError::RomTooLarge { size: data.len(), max: MAX_ROM_SIZE });
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn missing_file() {
        let path = Path::new("/definitely/not/a/rom.ch8");
        assert_eq!(read_rom(path), Err(LoadError::RomUnreadable));
    }
    #[test]
    fn reads_and_checks_size() {
        let dir = std::env::temp_dir();
        let ok = dir.join(format!("chip_desktop_ok_{}.ch8", std::process::id()));
        let big = dir.join(format!("chip_desktop_big_{}.ch8", std::process::id()));
        fs::write(&ok, [0x12, 0x00]).unwrap();
        fs::write(&big, vec![0u8; MAX_ROM_SIZE + 1]).unwrap();
        assert_eq!(read_rom(&ok), Ok(vec![0x12, 0x00]));
        assert_eq!(
            read_rom(&big),
            Err(LoadError::RomTooLarge { size: MAX_ROM_SIZE + 1, max: MAX_ROM_SIZE })
        );
        let _ = fs::remove_file(ok);
        let _ = fs::remove_file(big);
    }
}
