// ==========================================
// 销售看板 - 导出集成测试
// ==========================================
// 导出的 JSON 可被文件数据源原样重新导入
// ==========================================

mod helpers;

use helpers::mock_source::ScriptedSource;
use helpers::test_data_builder::{batch, RawRecordBuilder};
use sales_dashboard::api::DashboardApi;
use sales_dashboard::source::{FileRecordSource, RecordSource};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_exported_records_reimport_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let raw = vec![
        RawRecordBuilder::sale(2024, 1, "ENE", "Ana", 150.0, 100.0)
            .field("cod_vendedor", json!("V01"))
            .field("mes_nombre", json!("Enero"))
            .build(),
        RawRecordBuilder::sale(2024, 2, "FEB", "Luis", 80.5, 0.0)
            .field("ultima_actualizacion", json!("2024-02-28"))
            .build(),
    ];
    let api = DashboardApi::new(ScriptedSource::new(vec![Ok(batch(raw))]));
    api.refresh().await.unwrap();

    // 筛选不影响导出内容
    api.set_seller("Ana").unwrap();
    let path = api.export_records(dir.path()).unwrap();

    let file_name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("dashboard_ventas_"));
    assert!(file_name.ends_with(".json"));

    let reimported = DashboardApi::new(Arc::new(FileRecordSource::new(&path)));
    reimported.refresh().await.unwrap();

    assert_eq!(reimported.snapshot().records(), api.snapshot().records());
}

#[tokio::test]
async fn test_views_csv_written_for_current_filters() {
    let dir = tempfile::tempdir().unwrap();
    let raw = vec![
        RawRecordBuilder::sale(2024, 1, "ENE", "Ana", 100.0, 100.0).build(),
        RawRecordBuilder::sale(2024, 1, "ENE", "Luis", 200.0, 100.0).build(),
    ];
    let api = DashboardApi::new(ScriptedSource::new(vec![Ok(batch(raw))]));
    api.refresh().await.unwrap();
    api.set_seller("Luis").unwrap();

    let (periods, sellers) = api.export_views_csv(dir.path()).unwrap();

    let sellers_text = std::fs::read_to_string(sellers).unwrap();
    assert_eq!(sellers_text.lines().count(), 2);
    assert!(sellers_text.contains("Luis"));
    assert!(!sellers_text.contains("Ana"));

    let periods_text = std::fs::read_to_string(periods).unwrap();
    assert!(periods_text.contains("001-ENE"));
}

#[tokio::test]
async fn test_file_source_reads_csv_with_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ventas.csv");
    std::fs::write(
        &path,
        "AÑO,PERIODO,MES,VENDEDOR,VENTAS,META\n2024,1,ene,Ana,\"1.500,50\",1000\n",
    )
    .unwrap();

    let batch = FileRecordSource::new(&path).fetch_batch().await.unwrap();
    assert_eq!(batch.records.len(), 1);

    let api = DashboardApi::new(Arc::new(FileRecordSource::new(&path)));
    api.refresh().await.unwrap();
    let state = api.snapshot();
    let record = &state.records()[0];

    assert_eq!(record.year, 2024);
    assert_eq!(record.month_code, "ENE");
    assert!((record.actual - 1500.5).abs() < 1e-9);
    assert!((record.attainment1 - 150.05).abs() < 1e-9);
}
