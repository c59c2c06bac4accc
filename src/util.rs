//! Utility functions.

use std::{ffi, fs, io, path};

/// Convert a string into a C string, rejecting interior NUL bytes.
pub fn cstring<T>(text: T) -> Result<ffi::CString, ffi::NulError>
    where T: Into<Vec<u8>>
{
    ffi::CString::new(text)
}

/// Read the whole of a UTF-8 text file.
pub fn read_file_to_string<P>(path: P) -> io::Result<String>
    where P: AsRef<path::Path>
{
    use io::Read;
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cstring_rejects_interior_nul() {
        assert!(cstring("u_color").is_ok());
        assert!(cstring("u_\0color").is_err());
    }

    #[test]
    fn reads_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.frag.glsl");
        fs::write(&path, "uniform float u_green;\nvoid main() {}\n").unwrap();
        assert_eq!(
            read_file_to_string(&path).unwrap(),
            "uniform float u_green;\nvoid main() {}\n",
        );
        assert!(read_file_to_string(dir.path().join("missing")).is_err());
    }
}
