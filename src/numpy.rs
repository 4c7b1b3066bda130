//! Write NDArrays as Numpy arrays

use ndarray::prelude::*;
use ndarray as nd;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use byteorder::{LittleEndian, WriteBytesExt};
use crate::errors::*;

/// The complete `.npy` (version 1.0) header for a little endian f64 matrix
pub fn header(rows: usize, cols: usize) -> Vec<u8> {
    let header_nospace = format!("{{'descr': '<f8', 'fortran_order': False, 'shape': ({}, {}), }}",
        rows, cols);
    let virtual_len =
        // Calculating how many bytes we have in the header, so we can get alignment
        header_nospace.len()
        + 6 // The magic string
        + 2 // The version number
        + 2 // An unsigned 2-byte integer for header length
        + 1 ; // Because there will be a \n added
    let padding_needed = (((virtual_len + 15) / 16) * 16) - virtual_len; // to get to the next 16

    let mut out = Vec::with_capacity(virtual_len + padding_needed);
    out.extend_from_slice(b"\x93NUMPY\x01\x00");
    // Magic string, version number and the length itself are not counted
    let len = (header_nospace.len() + padding_needed + 1) as u16;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(header_nospace.as_bytes());
    out.extend(::std::iter::repeat(b' ').take(padding_needed));
    out.push(b'\n');
    out
}

/// Write a matrix as a numpy array, row major, whatever its memory layout
pub fn write_matrix<S, W>(writer: W, arr: &ArrayBase<S, Ix2>) -> Result<()>
    where S: nd::Data<Elem=f64>, W: Write {
    let mut writer = BufWriter::new(writer);
    writer.write_all(&header(arr.nrows(), arr.ncols()))?;
    // Logical iteration order is C order
    for &x in arr.iter() {
        writer.write_f64::<LittleEndian>(x)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_matrix_path<S, P>(path: P, arr: &ArrayBase<S, Ix2>) -> Result<()>
    where S: nd::Data<Elem=f64>, P: AsRef<Path> {
    write_matrix(File::create(path)?, arr)
}
