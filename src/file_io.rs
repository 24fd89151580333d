use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use crate::error::{GridError, Result};
use crate::grid::GridModel;

pub struct FileIO;

impl FileIO {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<GridModel> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GridError::NotFound {
                path: path.to_path_buf(),
            },
            _ => GridError::Io(e),
        })?;

        GridModel::deserialize(&content)
    }

    pub fn save<P: AsRef<Path>>(path: P, grid: &GridModel) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(grid.serialize().as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
