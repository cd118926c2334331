use inkmark::{CaptureFile, Recognizer, RegionLayout, ScaleRange};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <model.json> <layout.json> <strokes.json> [scale_range.txt]",
            args[0]
        );
        std::process::exit(2);
    }

    let mut recognizer = Recognizer::from_model_file(Path::new(&args[1]));
    if let Some(scale_path) = args.get(4) {
        recognizer = recognizer.with_scale_range(ScaleRange::from_text_file(Path::new(scale_path))?);
    }
    let mut layout =
        RegionLayout::from_json_file(Path::new(&args[2]))?.with_filter(&recognizer.config().region);
    let capture = CaptureFile::from_json_file(Path::new(&args[3]))?;

    for stroke in capture.to_strokes() {
        layout.route_stroke(&stroke, 10.0)?;
    }

    for named in layout.regions() {
        let results = recognizer.recognize(&named.region, true)?;
        for r in &results {
            match r.pattern {
                Some(p) => println!(
                    "{}: #{} {:?} ({:.2}%)",
                    named.name,
                    r.sequence,
                    p,
                    r.confidence()
                ),
                None => println!("{}: empty", named.name),
            }
        }
    }
    Ok(())
}
