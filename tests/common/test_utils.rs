#![allow(dead_code)]

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

/// One record read back from a scene stream.
#[derive(Debug, Clone)]
pub struct Record {
    pub tag: u8,
    pub size: u32,
    pub body: Vec<u8>,
}

impl Record {
    pub fn reader(&self) -> BodyReader<'_> {
        BodyReader::new(&self.body)
    }

    pub fn framed_size(&self) -> u64 {
        5 + self.size as u64
    }
}

/// Splits a scene stream into records, trusting each size field to find the
/// next header.
pub fn read_records(bytes: &[u8]) -> Vec<Record> {
    let mut cursor = Cursor::new(bytes);
    let mut records = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        let tag = cursor.read_u8().expect("record tag");
        let size = cursor.read_u32::<LittleEndian>().expect("record size");
        let mut body = vec![0; size as usize];
        cursor.read_exact(&mut body).expect("record body");
        records.push(Record { tag, size, body });
    }
    records
}

/// Reads primitives back in the layout the primitive writer produces.
pub struct BodyReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BodyReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    pub fn byte(&mut self) -> u8 {
        self.cursor.read_u8().expect("byte")
    }

    pub fn bool(&mut self) -> bool {
        match self.byte() {
            0 => false,
            1 => true,
            other => panic!("invalid bool byte {other}"),
        }
    }

    pub fn u32(&mut self) -> u32 {
        self.cursor.read_u32::<LittleEndian>().expect("u32")
    }

    pub fn f32(&mut self) -> f32 {
        self.cursor.read_f32::<LittleEndian>().expect("f32")
    }

    pub fn text(&mut self) -> String {
        let mut bytes = Vec::new();
        loop {
            match self.byte() {
                0 => break,
                b => bytes.push(b),
            }
        }
        String::from_utf8(bytes).expect("utf-8 text")
    }

    pub fn vector(&mut self) -> Vec<f32> {
        let len = self.u32();
        (0..len).map(|_| self.f32()).collect()
    }

    /// Returns `(count, dimension, rows)`.
    pub fn vector_array(&mut self) -> (u32, u32, Vec<Vec<f32>>) {
        let count = self.u32();
        let dimension = self.u32();
        let rows = (0..count)
            .map(|_| (0..dimension).map(|_| self.f32()).collect())
            .collect();
        (count, dimension, rows)
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.position() as usize == self.cursor.get_ref().len()
    }
}

pub fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}
