//! End-to-end degradation flows over synthetic pages.

mod common;

use common::fixtures::{gradient_page, init_tracing, rng, text_page_rgb};
use scanforge::lighting::{DecayMode, LightMaskConfig, LightMaskSynthesizer};
use scanforge::stages::{
    Dither, DitherMethod, Geometric, GeometricConfig, JpegArtifacts, JpegConfig, Letterpress,
    LetterpressConfig, SubtleNoise, SubtleNoiseConfig,
};
use scanforge::{presets, Augmentation, Pipeline};

#[test]
fn halftone_pipeline_emits_binary_planes() {
    let page = text_page_rgb(40, 30);
    let pipeline = Pipeline::new(vec![
        Box::new(SubtleNoise::new(SubtleNoiseConfig { range: 4, p: 1.0 }).unwrap()),
        Box::new(Dither::new(DitherMethod::Ordered { order: 5 }, 1.0).unwrap()),
    ]);
    let run = pipeline.run(&mut rng(11), &page).unwrap();
    assert!(
        run.image.data().iter().all(|&v| v == 0 || v == 255),
        "ordered dithering must leave only black and white"
    );
}

#[test]
fn error_diffusion_after_geometry_keeps_borders() {
    let page = gradient_page(33, 21);
    let pipeline = Pipeline::new(vec![
        Box::new(
            Geometric::new(GeometricConfig {
                crop: Some((1, 1, 31, 19)),
                ..Default::default()
            })
            .unwrap(),
        ),
        Box::new(Dither::new(DitherMethod::FloydSteinberg, 1.0).unwrap()),
    ]);
    let run = pipeline.run(&mut rng(13), &page).unwrap();
    assert_eq!((run.image.width(), run.image.height()), (30, 18));

    let cropped = run.records[0].output.as_ref().unwrap();
    for x in 0..30 {
        assert_eq!(
            run.image.get(x, 0, 0),
            cropped.get(x, 0, 0),
            "top border must survive error diffusion untouched"
        );
    }
    for y in 1..17 {
        for x in 1..29 {
            let v = run.image.get(x, y, 0);
            assert!(v == 0 || v == 255, "interior must be binary, got {v}");
        }
    }
}

#[test]
fn light_mask_full_turn_matches_no_turn() {
    let base = LightMaskConfig {
        position: Some((12, 7)),
        max_brightness: 255,
        min_brightness: 20,
        mode: DecayMode::Gaussian,
        direction: None,
    };
    let zero = LightMaskSynthesizer::new(LightMaskConfig {
        direction: Some(0.0),
        ..base
    })
    .unwrap();
    let full = LightMaskSynthesizer::new(LightMaskConfig {
        direction: Some(360.0),
        ..base
    })
    .unwrap();

    let mask_a = zero.generate(&mut rng(17), 36, 28);
    let mask_b = full.generate(&mut rng(17), 36, 28);
    for (a, b) in mask_a.iter().zip(&mask_b) {
        assert!(
            (*a as i16 - *b as i16).abs() <= 1,
            "0 vs 360 degrees diverged: {a} vs {b}"
        );
    }
}

#[test]
fn letterpress_spares_paper() {
    let page = text_page_rgb(36, 36);
    let stage = Letterpress::new(LetterpressConfig {
        n_samples: (30, 60),
        n_clusters: (4, 8),
        std_range: (300, 600),
        ..Default::default()
    })
    .unwrap();
    let mut r = rng(19);
    let out = stage.transform(&mut r, &page).unwrap();
    for y in 0..36 {
        for x in 0..36 {
            for c in 0..3 {
                if page.get(x, y, c) >= 128 {
                    assert_eq!(
                        out.get(x, y, c),
                        page.get(x, y, c),
                        "paper at ({x},{y}) must be untouched"
                    );
                }
            }
        }
    }
}

#[test]
fn jpeg_stage_composes_with_dither() {
    let page = text_page_rgb(32, 24);
    let pipeline = Pipeline::new(vec![
        Box::new(
            JpegArtifacts::new(JpegConfig {
                quality_range: (30, 60),
                p: 1.0,
            })
            .unwrap(),
        ),
        Box::new(Dither::new(DitherMethod::Ordered { order: 3 }, 1.0).unwrap()),
    ]);
    let run = pipeline.run(&mut rng(23), &page).unwrap();
    assert_eq!(
        (run.image.width(), run.image.height(), run.image.channels()),
        (32, 24, 3)
    );
    assert!(run.image.data().iter().all(|&v| v == 0 || v == 255));
}

#[test]
fn scanner_preset_runs_end_to_end() {
    init_tracing();
    let page = text_page_rgb(64, 48);
    let pipeline = presets::scanner().unwrap();
    for seed in [1u64, 2, 3] {
        let run = pipeline.run(&mut rng(seed), &page).unwrap();
        assert_eq!(
            (run.image.width(), run.image.height(), run.image.channels()),
            (64, 48, 3)
        );
        assert_eq!(run.records.len(), 4);
    }
}

#[test]
fn stage_configs_round_trip_through_json() {
    let geometric = GeometricConfig {
        crop: Some((2, 2, -1, -1)),
        fliplr: true,
        ..Default::default()
    };
    let json = serde_json::to_string(&geometric).unwrap();
    assert_eq!(
        serde_json::from_str::<GeometricConfig>(&json).unwrap(),
        geometric
    );

    let jpeg = JpegConfig::default();
    let json = serde_json::to_string(&jpeg).unwrap();
    assert_eq!(serde_json::from_str::<JpegConfig>(&json).unwrap(), jpeg);

    let mask = LightMaskConfig {
        mode: DecayMode::LinearStatic { rate: Some(1.25) },
        ..Default::default()
    };
    let json = serde_json::to_string(&mask).unwrap();
    assert_eq!(
        serde_json::from_str::<LightMaskConfig>(&json).unwrap(),
        mask
    );
}
