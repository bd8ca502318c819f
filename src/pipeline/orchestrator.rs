// file: src/pipeline/orchestrator.rs
// description: runs decode -> sanitize -> tokenize -> classify -> build for one file
// reference: pure function over bytes; the file read is the only async step

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::models::{ColumnProfile, DashboardView, FilePayload, IngestReport, NormalizedRecord};
use crate::parser::{Decoder, LineParser, Sanitizer};
use crate::pipeline::aggregator::Aggregator;
use crate::pipeline::builder::RecordBuilder;
use crate::schema::{ColumnKind, ColumnRole, HeaderClassifier, HeaderSchema};
use crate::utils::{StageTimer, Validator};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub payload: FilePayload,
    pub report: IngestReport,
}

pub struct IngestPipeline {
    decoder: Decoder,
    sanitizer: Sanitizer,
    parser: LineParser,
    classifier: HeaderClassifier,
    aggregator: Aggregator,
    max_file_size_mb: usize,
}

impl IngestPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        let delimiter = config.ingest.delimiter_char()?;
        Validator::validate_top_n(config.aggregation.top_n)?;

        Ok(Self {
            decoder: Decoder::new(),
            sanitizer: Sanitizer::new(),
            parser: LineParser::with_delimiter(delimiter),
            classifier: HeaderClassifier::new(&config.ingest.aliases),
            aggregator: Aggregator::new(config.aggregation.top_n),
            max_file_size_mb: config.ingest.max_file_size_mb,
        })
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Reads the whole file, then runs the synchronous pipeline over it.
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestOutcome> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PipelineError::FileOperation {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Read {} bytes from {}", bytes.len(), path.display());
        self.run(&bytes)
    }

    /// Header classification only; used to preview how a file will be read.
    pub fn inspect(&self, bytes: &[u8]) -> Result<HeaderSchema> {
        Validator::validate_file_size(bytes.len() as u64, self.max_file_size_mb)?;

        let decoded = self.decoder.decode(bytes);
        let text = self.sanitizer.sanitize(&decoded.text);
        let lines = self.parser.parse(&text)?;
        Ok(self.classifier.build_schema(&lines.header))
    }

    pub fn run(&self, bytes: &[u8]) -> Result<IngestOutcome> {
        Validator::validate_file_size(bytes.len() as u64, self.max_file_size_mb)?;

        let mut timer = StageTimer::new("ingest");

        let decoded = self.decoder.decode(bytes);
        timer.lap("decode", bytes.len());

        let text = self.sanitizer.sanitize(&decoded.text);
        timer.lap("sanitize", text.len());

        let lines = self.parser.parse(&text)?;
        timer.lap("tokenize", lines.rows.len());

        let schema = self.classifier.build_schema(&lines.header);
        timer.lap("classify", schema.headers.len());

        let (records, rows_dropped) = RecordBuilder::new(&schema).build_all(&lines.rows);
        timer.lap("build", records.len());

        if records.is_empty() {
            warn!(
                "No usable rows: all {} row(s) lacked a product name",
                lines.rows.len()
            );
        } else if rows_dropped > 0 {
            info!("Dropped {} row(s) without a product name", rows_dropped);
        }

        let columns = profile_columns(&schema.headers, &records);
        timer.warn_if_slow(Duration::from_secs(5));

        let report = IngestReport {
            encoding: decoded.encoding,
            source_sha256: format!("{:x}", Sha256::digest(bytes)),
            file_size: bytes.len() as u64,
            line_count: lines.line_count,
            rows_parsed: lines.rows.len(),
            rows_dropped,
            mapping: schema.mapping,
            matched_name_column: role_header(&schema, ColumnRole::ProductName),
            matched_price_column: role_header(&schema, ColumnRole::Price),
            matched_quantity_column: role_header(&schema, ColumnRole::Quantity),
            columns,
            timings: timer.finish(),
        };

        info!(
            "Ingested {} record(s) from {} row(s) ({})",
            records.len(),
            report.rows_parsed,
            report.encoding
        );

        Ok(IngestOutcome {
            payload: FilePayload {
                data: records,
                headers: schema.headers,
            },
            report,
        })
    }

    pub fn dashboard(&self, outcome: &IngestOutcome) -> DashboardView {
        self.aggregator.dashboard(&outcome.payload.data)
    }
}

fn role_header(schema: &HeaderSchema, role: ColumnRole) -> Option<String> {
    schema
        .mapping
        .header_for(role, &schema.headers)
        .map(str::to_string)
}

fn profile_columns(headers: &[String], records: &[NormalizedRecord]) -> Vec<ColumnProfile> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| ColumnProfile {
            header: header.clone(),
            kind: ColumnKind::infer(records.iter().filter_map(|r| r.fields.at(idx))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::EUC_KR;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const SALES_CSV: &str = "\u{FEFF}상품명,단가,판매량,비고\r\n\
        사과,\"1,000\",3,fresh\r\n\
        배,1500,2,\r\n\
        ,900,4,no name\r\n\
        사과,1000,1,\"late, discounted\"\r\n";

    fn pipeline() -> IngestPipeline {
        IngestPipeline::new(&Config::default_config()).unwrap()
    }

    #[test]
    fn test_run_end_to_end() {
        let outcome = pipeline().run(SALES_CSV.as_bytes()).unwrap();

        assert_eq!(outcome.payload.headers, vec!["상품명", "단가", "판매량", "비고"]);
        assert_eq!(outcome.payload.data.len(), 3);
        assert_eq!(outcome.report.rows_parsed, 4);
        assert_eq!(outcome.report.rows_dropped, 1);
        assert_eq!(outcome.report.matched_price_column.as_deref(), Some("단가"));

        let first = &outcome.payload.data[0];
        assert_eq!(first.product_name(), "사과");
        assert_eq!(first.price(), 1000.0);
        assert_eq!(first.quantity(), 3);
        assert_eq!(outcome.payload.data[2].fields.get("비고"), Some("late, discounted"));
    }

    #[test]
    fn test_euc_kr_input_matches_utf8_input() {
        let pipeline = pipeline();
        let text = "상품명,가격,수량\n김치,5000,2\n";
        let (euc, _, _) = EUC_KR.encode(text);

        let from_utf8 = pipeline.run(text.as_bytes()).unwrap();
        let from_euc = pipeline.run(&euc).unwrap();

        assert_eq!(from_euc.report.encoding, crate::parser::SourceEncoding::EucKr);
        assert_eq!(from_utf8.payload, from_euc.payload);
    }

    #[test]
    fn test_header_only_file_is_insufficient() {
        let result = pipeline().run("상품명,가격,수량\r\n".as_bytes());
        assert!(matches!(
            result,
            Err(PipelineError::InsufficientData { lines: 1 })
        ));
    }

    #[test]
    fn test_unnamed_rows_give_empty_payload() {
        let outcome = pipeline().run(b"date,price\n2024-01-01,10\n").unwrap();
        assert!(outcome.payload.is_empty());
        assert_eq!(outcome.report.rows_dropped, 1);
        assert_eq!(outcome.report.mapping.product_name, None);
    }

    #[test]
    fn test_report_metadata() {
        let outcome = pipeline().run(SALES_CSV.as_bytes()).unwrap();
        let report = &outcome.report;

        assert_eq!(report.source_sha256.len(), 64);
        assert_eq!(report.file_size, SALES_CSV.len() as u64);
        assert_eq!(report.timings.len(), 5);
        assert_eq!(report.columns[0].kind, ColumnKind::String);
        assert_eq!(report.columns[2].kind, ColumnKind::Integer);
        assert_eq!(report.columns[1].kind, ColumnKind::String);
    }

    #[test]
    fn test_size_limit() {
        let mut config = Config::default_config();
        config.ingest.max_file_size_mb = 1;
        let pipeline = IngestPipeline::new(&config).unwrap();

        let big = format!("item,price\n{}", "a,1\n".repeat(300_000));
        assert!(matches!(
            pipeline.run(big.as_bytes()),
            Err(PipelineError::Validation(_))
        ));
    }

    #[test]
    fn test_size_limit_applies_to_inspect() {
        let mut config = Config::default_config();
        config.ingest.max_file_size_mb = 1;
        let pipeline = IngestPipeline::new(&config).unwrap();

        let big = format!("item,price\n{}", "a,1\n".repeat(300_000));
        assert!(matches!(
            pipeline.inspect(big.as_bytes()),
            Err(PipelineError::Validation(_))
        ));
    }

    #[test]
    fn test_inspect_classifies_headers() {
        let schema = pipeline().inspect("Item Name,Unit Price,Qty\nx,1,1".as_bytes()).unwrap();
        assert_eq!(schema.mapping.product_name, Some(0));
        assert_eq!(schema.mapping.price, Some(1));
        assert_eq!(schema.mapping.quantity, Some(2));
    }

    #[test]
    fn test_dashboard_from_outcome() {
        let pipeline = pipeline();
        let outcome = pipeline.run(SALES_CSV.as_bytes()).unwrap();
        let view = pipeline.dashboard(&outcome);

        assert_eq!(view.summary.product_count, 2);
        assert_eq!(view.summary.total_quantity, 6);
        assert_eq!(view.summary.total_sales, 7000.0);
        assert_eq!(view.top_products[0].name, "사과");
    }

    #[test]
    fn test_huge_quantities_saturate_totals() {
        let pipeline = pipeline();
        let outcome = pipeline
            .run(b"item,price,qty\nA,1,9223372036854775807\nA,1,1\nB,1,5\n")
            .unwrap();
        let view = pipeline.dashboard(&outcome);

        assert_eq!(view.top_products[0].name, "A");
        assert_eq!(view.top_products[0].total_quantity, i64::MAX);
        assert_eq!(view.summary.total_quantity, i64::MAX);
    }

    #[tokio::test]
    async fn test_ingest_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, SALES_CSV).unwrap();

        let outcome = pipeline().ingest_file(&path).await.unwrap();
        assert_eq!(outcome.payload.data.len(), 3);
    }

    #[test]
    fn test_ingest_file_blocking() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.txt");
        fs::write(&path, "item,qty\nTea,2\n").unwrap();

        let outcome = tokio_test::block_on(pipeline().ingest_file(&path)).unwrap();
        assert_eq!(outcome.payload.data[0].quantity(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_file_operation_error() {
        let err = pipeline()
            .ingest_file(Path::new("/nonexistent/sales.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::FileOperation { .. }));
        assert!(err.is_user_facing());
    }
}
