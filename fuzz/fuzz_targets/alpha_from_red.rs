#![no_main]

use std::{ffi::OsString, num::NonZeroU8, path::Path};

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct StructuredImage {
    width: NonZeroU8,
    height: NonZeroU8,
    rgba_data: Vec<u8>,
}

impl StructuredImage {
    fn save_as_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.rgba_data,
            self.width.get() as u32,
            self.height.get() as u32,
            image::ExtendedColorType::Rgba8,
        )
    }
}

impl<'a> arbitrary::Arbitrary<'a> for StructuredImage {
    fn arbitrary(unstructured: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let width: NonZeroU8 = unstructured.arbitrary()?;
        let height: NonZeroU8 = unstructured.arbitrary()?;
        let rgba_data_len = width.get() as usize * height.get() as usize * 4;
        let rgba_data = unstructured.bytes(rgba_data_len)?;

        Ok(Self {
            width,
            height,
            rgba_data: rgba_data.to_vec(),
        })
    }
}

fuzz_target!(|input: (StructuredImage, u16, bool)| {
    let (image, factor_per_mille, truncate) = input;
    let factor = f64::from(factor_per_mille) / 1000.0;

    let temp_directory = tempfile::tempdir().expect("failed to create temporary directory");
    let input_path = temp_directory.path().join("input.png");
    let output_path = temp_directory.path().join("output.png");
    image
        .save_as_png(&input_path)
        .expect("failed to save image as PNG");

    let arguments: Vec<OsString> = vec![
        "alphamask".into(),
        "-factor".into(),
        factor.to_string().into(),
        "-rounding".into(),
        if truncate { "truncate" } else { "nearest" }.into(),
        input_path.clone().into_os_string(),
        output_path.clone().into_os_string(),
    ];
    let plan = alphamask::args::parse_args(arguments).expect("must have succeeded");
    plan.execute().expect("must have succeeded");

    let output = image::open(&output_path)
        .expect("could not open the output file")
        .to_rgba8();
    assert_eq!(output.width(), image.width.get() as u32);
    assert_eq!(output.height(), image.height.get() as u32);

    for (before, after) in image.rgba_data.chunks_exact(4).zip(output.pixels()) {
        let scaled = f64::from(255 - before[0]) * factor;
        let rounded = if truncate { scaled.trunc() } else { scaled.round() };
        let expected = rounded.min(255.0) as u8;
        assert_eq!(after.0, [0, 0, 0, expected]);
    }
});
