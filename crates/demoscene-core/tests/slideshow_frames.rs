use demoscene_core::slideshow::{self, SlideshowParams};

/// Generate a full default-sized slideshow and sanity-check every frame.
#[test]
fn default_slideshow_generates_full_sequence() {
    let params = SlideshowParams::default();
    let frames = slideshow::generate(&params, 1234).unwrap();

    // 8 maps with 3 transitions between each pair.
    assert_eq!(frames.len(), 29);
    assert_eq!(frames.len(), slideshow::frame_count(&params) as usize);

    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.width, params.map_width);
        assert_eq!(frame.height, params.map_height);
        assert_eq!(
            frame.pixels.len(),
            (params.map_width * params.map_height) as usize
        );

        // Perlin output should not be a flat image.
        let min = frame.pixels.iter().min().unwrap();
        let max = frame.pixels.iter().max().unwrap();
        assert!(max > min, "frame {i} is flat");
    }
}

/// Transition frames sit between their neighbours: each one adds a
/// growing share of the next base map, so consecutive transition frames
/// differ from each other and from the surrounding base maps.
#[test]
fn transitions_progress_between_base_maps() {
    let params = SlideshowParams {
        octaves: 3,
        base_maps: 2,
        transitions: 3,
        map_width: 32,
        map_height: 32,
        frame_delay_ms: 10,
    };
    let frames = slideshow::generate(&params, 5).unwrap();
    assert_eq!(frames.len(), 5);

    for window in frames.windows(2) {
        assert_ne!(window[0].pixels, window[1].pixels);
    }
}

/// Same seed, same frames; the slideshow can always be regenerated
/// instead of cached on disk.
#[test]
fn regeneration_is_reproducible() {
    let params = SlideshowParams {
        map_width: 24,
        map_height: 24,
        ..SlideshowParams::default()
    };
    let first = slideshow::generate(&params, 77).unwrap();
    let second = slideshow::generate(&params, 77).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.pixels, b.pixels);
    }
}
