// file: tests/pipeline.rs
// description: end-to-end ingest through the public api

use encoding_rs::EUC_KR;
use pretty_assertions::assert_eq;
use sales_ingest::{
    Config, CsvExporter, IngestPipeline, JsonExporter, PipelineError, SourceEncoding,
};
use std::fs;
use tempfile::TempDir;

const LEDGER: &str = "날짜,제품,가격,판매량\n\
    2024-03-01,라면,1200,10\n\
    2024-03-01,우유,\"2,500\",4\n\
    2024-03-02,라면,1200,5\n\
    2024-03-02,,800,9\n\
    2024-03-03,커피,4500,1\n";

fn pipeline() -> IngestPipeline {
    IngestPipeline::new(&Config::default_config()).unwrap()
}

#[tokio::test]
async fn test_euc_kr_file_to_dashboard() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.csv");
    let (encoded, _, _) = EUC_KR.encode(LEDGER);
    fs::write(&path, &encoded).unwrap();

    let pipeline = pipeline();
    let outcome = pipeline.ingest_file(&path).await.unwrap();

    assert_eq!(outcome.report.encoding, SourceEncoding::EucKr);
    assert_eq!(outcome.report.rows_parsed, 5);
    assert_eq!(outcome.report.rows_dropped, 1);
    assert_eq!(outcome.report.matched_name_column.as_deref(), Some("제품"));

    let view = pipeline.dashboard(&outcome);
    let ranking: Vec<(&str, i64, f64)> = view
        .top_products
        .iter()
        .map(|p| (p.name.as_str(), p.total_quantity, p.total_sales))
        .collect();

    assert_eq!(
        ranking,
        vec![("라면", 15, 18000.0), ("우유", 4, 10000.0), ("커피", 1, 4500.0)]
    );
    assert_eq!(view.summary.total_quantity, 20);
    assert_eq!(view.summary.total_sales, 32500.0);
}

#[test]
fn test_payload_json_shape() {
    let outcome = pipeline().run(LEDGER.as_bytes()).unwrap();
    let json = serde_json::to_value(&outcome.payload).unwrap();

    assert_eq!(json["headers"], serde_json::json!(["날짜", "제품", "가격", "판매량"]));
    assert_eq!(
        json["data"][1],
        serde_json::json!({
            "날짜": "2024-03-01",
            "제품": "우유",
            "가격": "2,500",
            "판매량": "4",
            "product_name": "우유",
            "Price": 2500.0,
            "Quantity": 4
        })
    );
}

#[tokio::test]
async fn test_exports_land_in_output_dir() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("ledger.csv");
    fs::write(&source, LEDGER).unwrap();

    let pipeline = pipeline();
    let outcome = pipeline.ingest_file(&source).await.unwrap();
    let view = pipeline.dashboard(&outcome);

    let out = dir.path().join("exports");
    let manifest = JsonExporter::new(&out, true)
        .unwrap()
        .export_all(&source, &outcome.payload, &view)
        .unwrap();
    let normalized = CsvExporter::new(&out)
        .unwrap()
        .export(&source, &outcome.payload)
        .unwrap();

    assert_eq!(manifest.total_records, 4);
    assert!(manifest.files.iter().all(|file| file.exists()));

    let csv_text = fs::read_to_string(normalized).unwrap();
    assert_eq!(csv_text.lines().count(), 5);
    assert!(csv_text.starts_with("날짜,제품,가격,판매량,product_name,Price,Quantity"));
}

#[test]
fn test_single_line_file_is_rejected() {
    let err = pipeline().run("제품,가격".as_bytes()).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData { lines: 1 }));
}

#[test]
fn test_semicolon_delimiter_from_config() {
    let mut config = Config::default_config();
    config.ingest.delimiter = ";".to_string();
    let pipeline = IngestPipeline::new(&config).unwrap();

    let outcome = pipeline.run(b"item;price;qty\nTea;3,5;2\n").unwrap();
    let record = &outcome.payload.data[0];
    assert_eq!(record.product_name(), "Tea");
    assert_eq!(record.quantity(), 2);
}
