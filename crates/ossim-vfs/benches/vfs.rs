use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ossim_vfs::{MemoryVfs, path};

fn build_tree(depth: usize, width: usize) -> (MemoryVfs, String) {
    let mut vfs = MemoryVfs::new();
    let mut parent = "/".to_string();
    for d in 0..depth {
        for w in 0..width {
            vfs.create_file(&parent, &format!("file{w}.txt"), "lorem ipsum dolor")
                .unwrap();
        }
        let name = format!("dir{d}");
        vfs.create_directory(&parent, &name).unwrap();
        parent = path::join(&parent, &name);
    }
    (vfs, parent)
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_relative", |b| {
        b.iter(|| path::normalize(black_box("/home/user"), black_box("docs/notes.txt")))
    });
    c.bench_function("normalize_canonical", |b| {
        b.iter(|| path::canonicalize(black_box("/home/user/docs")))
    });
}

fn bench_navigate(c: &mut Criterion) {
    let (vfs, deepest) = build_tree(32, 8);
    c.bench_function("navigate_depth_32", |b| {
        b.iter(|| vfs.navigate(black_box(&deepest)).is_some())
    });
}

fn bench_list(c: &mut Criterion) {
    let (vfs, _) = build_tree(1, 256);
    c.bench_function("list_children_256", |b| {
        b.iter(|| vfs.list_children(black_box("/")).map(|v| v.len()))
    });
}

fn bench_find(c: &mut Criterion) {
    let (vfs, _) = build_tree(16, 16);
    c.bench_function("find_content", |b| {
        b.iter(|| vfs.find(black_box("/"), black_box("dolor")).map(|v| v.len()))
    });
}

criterion_group!(benches, bench_normalize, bench_navigate, bench_list, bench_find);
criterion_main!(benches);
