//! Shared test doubles: a recording bus interface, a delay that logs its
//! calls and an in-memory storage.

use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::command::{
    COLUMN_ADDRESS_SET, MEMORY_ACCESS_CONTROL, MEMORY_WRITE, PAGE_ADDRESS_SET,
};
use crate::config::Config;
use crate::display::Display;
use crate::interface::DisplayInterface;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Command(u8),
    Data(Vec<u8>),
    Read(u8),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusError;

#[derive(Debug, Default)]
pub struct RecordingInterface {
    pub events: Vec<Event>,
    /// Fail every transfer once this many events have been recorded
    pub fail_after: Option<usize>,
    pub read_response: Vec<u8>,
}

impl RecordingInterface {
    fn check(&self) -> Result<(), BusError> {
        match self.fail_after {
            Some(limit) if self.events.len() >= limit => Err(BusError),
            _ => Ok(()),
        }
    }

    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Command(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }

    /// Each command paired with the concatenation of the data sent after it
    pub fn command_data(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for event in &self.events {
            match event {
                Event::Command(cmd) => out.push((*cmd, Vec::new())),
                Event::Data(data) => {
                    if let Some((_, bytes)) = out.last_mut() {
                        bytes.extend_from_slice(data);
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// All data bytes in send order
    pub fn data_bytes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Data(data) => Some(data.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Pixel bytes written after every memory-write command
    pub fn pixel_stream(&self) -> Vec<u8> {
        self.command_data()
            .into_iter()
            .filter(|(cmd, _)| *cmd == MEMORY_WRITE)
            .flat_map(|(_, data)| data)
            .collect()
    }

    /// Pixel bytes written after each memory-write command, one entry per window
    pub fn window_streams(&self) -> Vec<Vec<u8>> {
        self.command_data()
            .into_iter()
            .filter(|(cmd, _)| *cmd == MEMORY_WRITE)
            .map(|(_, data)| data)
            .collect()
    }

    pub fn madctl_writes(&self) -> Vec<u8> {
        self.command_data()
            .into_iter()
            .filter(|(cmd, _)| *cmd == MEMORY_ACCESS_CONTROL)
            .flat_map(|(_, data)| data)
            .collect()
    }

    /// Decoded (x0, y0, x1, y1) of every window set
    pub fn windows(&self) -> Vec<(u16, u16, u16, u16)> {
        let params = self.command_data();
        let mut windows = Vec::new();
        for pair in params.windows(2) {
            let (first, cols) = &pair[0];
            let (second, rows) = &pair[1];
            if *first == COLUMN_ADDRESS_SET && *second == PAGE_ADDRESS_SET {
                windows.push((
                    u16::from_be_bytes([cols[0], cols[1]]),
                    u16::from_be_bytes([rows[0], rows[1]]),
                    u16::from_be_bytes([cols[2], cols[3]]),
                    u16::from_be_bytes([rows[2], rows[3]]),
                ));
            }
        }
        windows
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DisplayInterface for RecordingInterface {
    type Error = BusError;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.check()?;
        self.events.push(Event::Command(command));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.events.push(Event::Data(data.to_vec()));
        Ok(())
    }

    fn read_after_command(&mut self, command: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.check()?;
        self.events.push(Event::Read(command));
        for (dst, src) in buffer.iter_mut().zip(self.read_response.iter()) {
            *dst = *src;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.check()?;
        self.events.push(Event::Reset);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CountingDelay {
    pub delays_ms: Vec<u32>,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

pub fn test_display() -> Display<RecordingInterface> {
    Display::new(RecordingInterface::default(), Config::default())
}

#[cfg(feature = "alloc")]
pub use mem::{MemError, MemStorage};

#[cfg(feature = "alloc")]
mod mem {
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use crate::storage::{Storage, StorageFile};

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct MemError;

    #[derive(Debug)]
    pub struct MemFile {
        data: Rc<RefCell<Vec<u8>>>,
        pos: usize,
        /// Reads starting at or past this offset fail
        fail_from: Option<usize>,
    }

    impl StorageFile for MemFile {
        type Error = MemError;

        fn len(&mut self) -> Result<u64, Self::Error> {
            Ok(self.data.borrow().len() as u64)
        }

        fn seek(&mut self, offset: u64) -> Result<(), Self::Error> {
            self.pos = usize::try_from(offset).map_err(|_| MemError)?;
            Ok(())
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.fail_from.is_some_and(|offset| self.pos >= offset) {
                return Err(MemError);
            }
            let data = self.data.borrow();
            let available = data.len().saturating_sub(self.pos);
            let n = available.min(buf.len());
            buf[..n].copy_from_slice(&data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }

        fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            let mut data = self.data.borrow_mut();
            let end = self.pos + bytes.len();
            if data.len() < end {
                data.resize(end, 0);
            }
            data[self.pos..end].copy_from_slice(bytes);
            self.pos = end;
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub struct MemStorage {
        files: BTreeMap<String, Rc<RefCell<Vec<u8>>>>,
        dirs: BTreeSet<String>,
        failing_reads: BTreeMap<String, usize>,
    }

    impl MemStorage {
        pub fn insert(&mut self, path: &str, bytes: Vec<u8>) {
            self.files
                .insert(path.to_string(), Rc::new(RefCell::new(bytes)));
        }

        pub fn get(&self, path: &str) -> Option<Vec<u8>> {
            self.files.get(path).map(|data| data.borrow().clone())
        }

        pub fn has_dir(&self, path: &str) -> bool {
            self.dirs.contains(path)
        }

        /// Make reads of `path` fail once they reach `offset`
        pub fn fail_reads_from(&mut self, path: &str, offset: usize) {
            self.failing_reads.insert(path.to_string(), offset);
        }
    }

    impl Storage for MemStorage {
        type Error = MemError;
        type File = MemFile;

        fn open(&mut self, path: &str) -> Result<Option<Self::File>, Self::Error> {
            Ok(self.files.get(path).map(|data| MemFile {
                data: Rc::clone(data),
                pos: 0,
                fail_from: self.failing_reads.get(path).copied(),
            }))
        }

        fn create(&mut self, path: &str) -> Result<Self::File, Self::Error> {
            let data = Rc::new(RefCell::new(Vec::new()));
            self.files.insert(path.to_string(), Rc::clone(&data));
            Ok(MemFile {
                data,
                pos: 0,
                fail_from: None,
            })
        }

        fn create_dir_all(&mut self, path: &str) -> Result<(), Self::Error> {
            self.dirs.insert(path.to_string());
            Ok(())
        }

        fn list(&mut self, dir: &str) -> Result<Vec<String>, Self::Error> {
            let prefix = alloc::format!("{dir}/");
            let mut names: Vec<String> = self
                .files
                .keys()
                .chain(self.dirs.iter())
                .filter_map(|path| path.strip_prefix(prefix.as_str()))
                .filter(|name| !name.is_empty() && !name.contains('/'))
                .map(ToString::to_string)
                .collect();
            names.sort();
            names.dedup();
            Ok(names)
        }

        fn remove(&mut self, path: &str) -> Result<(), Self::Error> {
            self.files.remove(path).map(|_| ()).ok_or(MemError)
        }
    }
}
