use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparsedim_core::{CoordRange, Error, SparseMatrix, SparseNd};
use sparsedim_io::*;
use sparsedim_kernels::{add_nd, mul_scalar_nd};
use std::io::Cursor;

fn random_nd(rng: &mut StdRng, dims: &[usize]) -> SparseNd<i32> {
    let mut a = SparseNd::new(dims.to_vec(), 0i32).unwrap();
    for c in &CoordRange::new(dims.to_vec()).unwrap() {
        let v = rng.random_range(0..101);
        a.set(if v > 20 { 0 } else { v }, &c).unwrap();
    }
    a
}

#[test]
fn round_trip_random_5d() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let dims = [20usize, 3, 7, 8, 9];
    let m1 = random_nd(&mut rng, &dims);
    let m2 = random_nd(&mut rng, &dims);
    assert_ne!(m1, m2);
    for (name, m) in [("_test1.bin", &m1), ("_test2.bin", &m2)] {
        let path = dir.path().join(name);
        dump(m, &path).unwrap();
        let loaded = load::<i32>(&path, 5).unwrap();
        assert_eq!(loaded.status, LoadStatus::Ok);
        assert_eq!(loaded.array, *m);
    }
}

#[test]
fn round_trip_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(10);
    let mut m = SparseMatrix::new(50, 51, 0i32).unwrap();
    for i in 0..50 {
        for j in 0..51 {
            if rng.random_range(0..5) == 0 {
                m.set(rng.random_range(1..100), i, j).unwrap();
            }
        }
    }
    let path = dir.path().join("test1.bin");
    dump_matrix(&m, &path).unwrap();
    let loaded = load_matrix::<i32>(&path).unwrap().ok().unwrap();
    assert_eq!(loaded, m);
}

#[test]
fn round_trip_empty_and_derived() {
    let a = SparseNd::new(vec![4, 1, 3], 7.5f64).unwrap();
    let mut buf = Vec::new();
    write_to(&a, &mut buf).unwrap();
    let back = read_from::<f64, _>(&mut Cursor::new(&buf), 3).unwrap();
    assert!(back.status.is_ok());
    assert_eq!(back.array, a);
    assert_eq!(back.array.default_value(), 7.5);

    let mut b = SparseNd::new(vec![3, 3], 1u16).unwrap();
    b.set(9, &[2, 1]).unwrap();
    let doubled = add_nd(&b, &mul_scalar_nd(&b, 1)).unwrap();
    let mut buf = Vec::new();
    write_to(&doubled, &mut buf).unwrap();
    let back = read_from::<u16, _>(&mut Cursor::new(&buf), 2).unwrap();
    assert_eq!(back.array, doubled);
}

#[test]
fn scenario_single_entry_3d() {
    let mut a = SparseNd::new(vec![3, 3, 3], 0i32).unwrap();
    a.set(42, &[2, 0, 1]).unwrap();
    let mut buf = Vec::new();
    write_to(&a, &mut buf).unwrap();
    let back = read_from::<i32, _>(&mut Cursor::new(&buf), 3).unwrap().ok().unwrap();
    assert_eq!(back.dims(), &[3, 3, 3]);
    assert_eq!(back.default_value(), 0);
    assert_eq!(back.nnz(), 1);
    let stored: Vec<(Vec<usize>, i32)> = back.iter_stored().collect();
    assert_eq!(stored, vec![(vec![2, 0, 1], 42)]);
}

#[test]
fn byte_layout_is_little_endian() {
    let mut a = SparseNd::new(vec![1, 2], -1i32).unwrap();
    a.set(3, &[0, 1]).unwrap();
    let mut buf = Vec::new();
    write_to(&a, &mut buf).unwrap();
    let words: Vec<i32> = buf
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(
        words,
        vec![
            -1, // default
            2, 1, 2, // ndim, dims
            1, 2, 0, 1, // row pointers: one slice, [0, 1]
            1, 1, 1, // column indices: one slice, [1]
            1, 1, 3, // values: one slice, [3]
        ]
    );
}

#[test]
fn missing_file_reports_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load::<i32>(dir.path().join("nope.bin"), 3).unwrap();
    assert_eq!(loaded.status, LoadStatus::OpenFailed);
    assert_eq!(loaded.status.code(), 1);
    assert_eq!(loaded.array.dims(), &[1, 1, 1]);
    assert!(loaded.ok().is_none());
}

#[test]
fn truncated_stream_reports_bad_stream() {
    let mut a = SparseNd::new(vec![2, 2], 0i64).unwrap();
    a.set(5, &[1, 1]).unwrap();
    let mut buf = Vec::new();
    write_to(&a, &mut buf).unwrap();
    buf.truncate(buf.len() - 3);
    let loaded = read_from::<i64, _>(&mut Cursor::new(&buf), 2).unwrap();
    assert_eq!(loaded.status, LoadStatus::BadStream);
    assert_eq!(loaded.status.code(), 2);
    assert_eq!(loaded.array.dims(), &[1, 1]);
}

#[test]
fn dimension_count_mismatch_is_an_error() {
    let a = SparseNd::new(vec![2, 2, 2], 0i32).unwrap();
    let mut buf = Vec::new();
    write_to(&a, &mut buf).unwrap();
    assert!(matches!(
        read_from::<i32, _>(&mut Cursor::new(&buf), 2),
        Err(Error::InvalidDimensions(_))
    ));
    assert!(matches!(
        read_from::<i32, _>(&mut Cursor::new(&buf), 1),
        Err(Error::InvalidDimensions(_))
    ));
}

#[test]
fn corrupt_sections_are_invalid_state() {
    let mut a = SparseNd::new(vec![1, 3], 0i32).unwrap();
    a.set(1, &[0, 0]).unwrap();
    a.set(2, &[0, 2]).unwrap();
    let mut buf = Vec::new();
    write_to(&a, &mut buf).unwrap();
    // column indices section starts after default, ndim, 2 dims, and the
    // 5-word row pointer section; swap the two stored columns
    let col0 = 4 * (1 + 1 + 2 + 4 + 2);
    buf[col0..col0 + 4].copy_from_slice(&2i32.to_le_bytes());
    buf[col0 + 4..col0 + 8].copy_from_slice(&0i32.to_le_bytes());
    assert!(matches!(
        read_from::<i32, _>(&mut Cursor::new(&buf), 2),
        Err(Error::InvalidState(_))
    ));
}
