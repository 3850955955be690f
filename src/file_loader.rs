use crate::error::{ImageError, VmError};
use crate::state::{Memory, MEMORY_SIZE};
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use std::io::{self, BufReader, Read};
use std::{fs, path::Path};

/// Loads an image file: a big-endian origin word followed by big-endian words placed at the
/// origin and upwards.
pub fn load_file<P: AsRef<Path>>(path: P, memory: &mut Memory) -> Result<(), VmError> {
    let path = path.as_ref();

    let result = fs::File::open(path)
        .map_err(ImageError::from)
        .and_then(|file| load_image(BufReader::new(file), memory));

    match result {
        Ok((origin, words)) => {
            tracing::info!(path = %path.display(), origin, words, "loaded image");
            Ok(())
        }
        Err(source) => Err(VmError::Image {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Returns the origin and the number of words loaded. Memory is untouched on error.
pub fn load_image<R: Read>(mut reader: R, memory: &mut Memory) -> Result<(u16, usize), ImageError> {
    let origin = match reader.read_u16::<BigEndian>() {
        Ok(origin) => origin,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(ImageError::MissingOrigin)
        }
        Err(e) => return Err(e.into()),
    };

    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    if data.len() % 2 != 0 {
        return Err(ImageError::OddLength);
    }

    let words = data.len() / 2;
    if words > MEMORY_SIZE - usize::from(origin) {
        return Err(ImageError::Overflow { origin, words });
    }

    let mut buffer = vec![0; words];
    BigEndian::read_u16_into(&data, &mut buffer);
    memory.load(origin, &buffer);

    Ok((origin, words))
}
