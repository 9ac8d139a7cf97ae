use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rustuploader::tag_processing::TagPipeline;
use rustuploader::youtube::{Playlist, PlaylistCache};
use rustuploader::VideoPreset;
use std::path::PathBuf;
use std::sync::Arc;

fn cache() -> Arc<PlaylistCache> {
    Arc::new(PlaylistCache::from_playlists(vec![Playlist {
        id: "PLbench".to_string(),
        title: "Bench".to_string(),
        privacy: None,
    }]))
}

fn benchmark_apply_preset(c: &mut Criterion) {
    let mut group = c.benchmark_group("Apply Preset");

    let with_markers = VideoPreset {
        name: "markers".to_string(),
        title: "$(filename) #$(autonum)".to_string(),
        description: "More at $(playlist)\n".repeat(20),
        tags: (0..30).map(|i| format!("tag{i}-$(autonum)")).collect(),
        selected_playlist: Some("PLbench".to_string()),
        ..Default::default()
    };
    let plain = VideoPreset {
        name: "plain".to_string(),
        title: "Plain title".to_string(),
        description: "No markers here\n".repeat(20),
        tags: (0..30).map(|i| format!("tag{i}")).collect(),
        ..Default::default()
    };

    for batch in [1usize, 50] {
        let files: Vec<PathBuf> = (0..batch)
            .map(|i| PathBuf::from(format!("/videos/clip{i}.mp4")))
            .collect();

        group.bench_function(format!("markers/{batch}"), |b| {
            b.iter(|| {
                TagPipeline::with_defaults(cache())
                    .apply_preset(black_box(&with_markers), black_box(&files), 1)
            })
        });

        group.bench_function(format!("plain/{batch}"), |b| {
            b.iter(|| {
                TagPipeline::with_defaults(cache())
                    .apply_preset(black_box(&plain), black_box(&files), 1)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_apply_preset);
criterion_main!(benches);
