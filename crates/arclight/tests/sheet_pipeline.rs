use arclight::render::SheetRenderer;
use arclight::{Bucket, Bundle};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn bundle_to_sheet_svg() {
    let manifest = workspace_root()
        .join("fixtures")
        .join("review")
        .join("bundle.json");
    let bundle = Bundle::load(&manifest).unwrap();

    let renderer = SheetRenderer::new().with_palette(bundle.palette.clone());
    for task in bundle
        .partition
        .bucket(Bucket::Correct)
        .iter()
        .chain(bundle.partition.bucket(Bucket::Incorrect))
    {
        let svg = renderer.sheet_svg(task);
        assert!(svg.contains(&format!("Task {}", task.id)));
        assert!(svg.contains("Ground Truth"));
        assert!(svg.contains("<circle"));
    }
}
