//! End-to-end reduction of a small HYG-format catalog.

use std::fs;
use std::io::Write;
use std::path::Path;

use approx::assert_relative_eq;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};
use starcolor::catalog::load_records;
use starcolor::config::PipelineConfig;
use starcolor::pipeline::{process_catalog_file, Execution, PipelineSummary};
use starcolor::CatalogError;

const HYG_SAMPLE: &str = "\
id,hip,hd,hr,gl,bf,proper,ra,dec,dist,pmra,pmdec,rv,mag,absmag,spect,ci,x,y,z,vx,vy,vz,rarad,decrad,pmrarad,pmdecrad,bayer,flam,con,comp,comp_primary,base,lum,var,var_min,var_max
0,,,,,,Sol,0.000000,0.000000,0.0000,0.00,0.00,0.0,-26.700,4.850,G2V,0.656,0.000005,0.000000,0.000000,0.00000000,0.00000000,0.00000000,0.00000000,0.00000000,0.00000000,0.00000000,,,,1,0,,1.000000000000,,,
32263,32349,48915,2491,Gl 244A,9Alp CMa,Sirius,6.752481,-16.716116,2.6371,-546.01,-1223.07,-5.5,-1.440,1.454,A0m...,0.009,-0.612240,2.392456,-0.751111,0.00000941,-0.00000103,-0.00001240,1.76779435,-0.29175203,-0.00000265,-0.00000593,Alp,9,CMa,1,32263,,22.824433121735,,,
27919,27989,39801,2061,,58Alp Ori,Betelgeuse,5.919529,7.407063,152.6718,27.54,11.30,21.0,0.450,-5.469,M1-2Ia-Iab,1.500,3.090868,150.685059,19.695337,0.00000997,0.00002050,-0.00000081,1.54975884,0.12927762,0.00000013,0.00000005,Alp,58,Ori,1,27919,,13259.13469878,SRC,0.580,0.000
100,101,,,,,,0.31,12.0,200.0,0,0,0,7.000,1.0,K0,1.1,1,1,1,,,,0,0,0,0,,,Psc,1,100,,2.0,,,
101,102,,,,,,0.32,13.0,210.0,0,0,0,6.999,1.0,K0,bad,4,5,6,,,,0,0,0,0,,,Psc,1,101,,,,,
102,103,,,,,,0.33,14.0,,0,0,0,,1.0,K0,1.1,1,1,1,,,,0,0,0,0,,,Psc,1,102,,,,,
103,,,,,,,,,,0,0,0,5.2,,M5V,,,,,,,,0,0,0,0,,,,1,103,,,,,
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_catalog(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write test catalog");
    path
}

fn reduce(input: &Path, output: &Path, execution: Execution) -> (PipelineSummary, Vec<Value>) {
    let summary = process_catalog_file(input, output, &PipelineConfig::default(), execution, true)
        .expect("Pipeline failed");
    let text = fs::read_to_string(output).expect("Output not written");
    let stars: Vec<Value> = serde_json::from_str(&text).expect("Output is not a JSON array");
    (summary, stars)
}

#[test]
fn test_reference_catalog() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_catalog(dir.path(), "hyg.csv", HYG_SAMPLE);
    let output = dir.path().join("bright_stars.json");

    let (summary, stars) = reduce(&input, &output, Execution::Sequential);

    assert_eq!(
        summary,
        PipelineSummary {
            rows: 7,
            kept: 5,
            filtered_faint: 1,
            skipped_unparseable: 1,
        }
    );

    let ids: Vec<&str> = stars.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["Sol", "Sirius", "Betelgeuse", "", ""]);

    let sol = &stars[0];
    assert_eq!(sol["color"], json!("#ffffff"));
    assert_eq!(sol["atmospheric_color"], json!("#cf9031"));
    assert_eq!(sol["temperature"], json!(2570));
    assert_eq!(sol["hip"], Value::Null);
    assert_eq!(sol["dist"], json!(0.0));
    assert_eq!(sol["lum"], json!(1.0));
    assert_eq!(sol["con"], json!(""));
    assert_relative_eq!(sol["size"].as_f64().unwrap(), 5.05);

    let sirius = &stars[1];
    assert_eq!(sirius["color"], json!("#6e9bff"));
    assert_eq!(sirius["atmospheric_color"], json!("#6a86be"));
    assert_eq!(sirius["temperature"], json!(9551));
    assert_eq!(sirius["hip"], json!(32349));
    assert_eq!(sirius["x"], json!(-0.61224));
    assert_eq!(sirius["vz"], json!(-0.0000124));
    assert_eq!(sirius["bayer"], json!("Alp"));
    assert_eq!(sirius["variable"], json!(false));
    assert!(sirius.get("var_min").is_none());
    assert_relative_eq!(sirius["size"].as_f64().unwrap(), 1.75);

    let betelgeuse = &stars[2];
    assert_eq!(betelgeuse["color"], json!("#ffff00"));
    assert_eq!(betelgeuse["atmospheric_color"], json!("#f1e100"));
    assert_eq!(betelgeuse["temperature"], json!(463));
    assert_eq!(betelgeuse["ci"], json!("1.500"));
    assert_eq!(betelgeuse["variable"], json!(true));
    assert_eq!(betelgeuse["var_min"], json!(0.58));
    assert_eq!(betelgeuse["var_max"], json!(0.0));
    assert_relative_eq!(
        betelgeuse["size"].as_f64().unwrap(),
        17857.17,
        epsilon = 1e-6
    );

    let unnamed = &stars[3];
    assert_eq!(unnamed["mag"], json!(6.999));
    assert_eq!(unnamed["color"], json!("#ffffff"));
    assert_eq!(unnamed["atmospheric_color"], json!("#faf5ee"));
    assert_eq!(unnamed["temperature"], json!(9000));
    assert_eq!(unnamed["ci"], json!("bad"));
    assert_eq!(unnamed["lum"], Value::Null);
    assert_eq!(unnamed["vx"], Value::Null);
    assert_relative_eq!(unnamed["size"].as_f64().unwrap(), 0.8);

    // Position and coordinates absent in the source
    let sparse = &stars[4];
    assert_eq!(sparse["x"], Value::Null);
    assert_eq!(sparse["ra"], json!(0.0));
    assert_eq!(sparse["dist"], json!(0.0));
    assert_eq!(sparse["hip"], Value::Null);
    assert_relative_eq!(sparse["size"].as_f64().unwrap(), 0.5);
}

#[test]
fn test_records_round_trip_through_typed_loader() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_catalog(dir.path(), "hyg.csv", HYG_SAMPLE);
    let output = dir.path().join("bright_stars.json");

    reduce(&input, &output, Execution::Parallel);
    let records = load_records(&output).unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(records[2].variability_range(), Some((0.58, 0.0)));
    assert_eq!(records[1].color.to_rgb().b, 255);
}

#[test]
fn test_execution_modes_agree() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_catalog(dir.path(), "hyg.csv", HYG_SAMPLE);

    let outputs: Vec<String> = [
        Execution::Sequential,
        Execution::Parallel,
        Execution::ParallelWith(3),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, execution)| {
        let output = dir.path().join(format!("out_{i}.json"));
        reduce(&input, &output, execution);
        fs::read_to_string(&output).unwrap()
    })
    .collect();

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
}

#[test]
fn test_gzipped_catalog() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hyg.csv.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&input).unwrap(), Compression::fast());
    encoder.write_all(HYG_SAMPLE.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let plain = write_catalog(dir.path(), "hyg.csv", HYG_SAMPLE);

    let (_, from_gz) = reduce(&input, &dir.path().join("a.json"), Execution::Sequential);
    let (_, from_plain) = reduce(&plain, &dir.path().join("b.json"), Execution::Sequential);
    assert_eq!(from_gz, from_plain);
}

#[test]
fn test_header_only_catalog_writes_empty_array() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = write_catalog(dir.path(), "empty.csv", "proper,mag,ci\n");
    let output = dir.path().join("out.json");

    let (summary, stars) = reduce(&input, &output, Execution::Parallel);
    assert_eq!(summary, PipelineSummary::default());
    assert!(stars.is_empty());
}

#[test]
fn test_unreadable_inputs_are_fatal() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");
    let config = PipelineConfig::default();

    let missing = dir.path().join("missing.csv");
    let err = process_catalog_file(&missing, &output, &config, Execution::Sequential, true)
        .unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));

    let no_mag = write_catalog(dir.path(), "no_mag.csv", "proper,ci\nVega,0.0\n");
    let err =
        process_catalog_file(&no_mag, &output, &config, Execution::Sequential, true).unwrap_err();
    assert!(matches!(err, CatalogError::MissingColumn(_)));

    assert!(!output.exists());
}
