// ==========================================
// 销售看板 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 规范字段（显式别名表,自左向右,首个命中即用）
// 约定: 每个别名表的首项即规范导出键
// ==========================================

use crate::domain::sales::RawRecord;
use serde_json::Value;

// ==========================================
// CanonicalField - 规范字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Id,
    Year,
    Period,
    MonthCode,
    MonthLabel,
    SellerCode,
    SellerName,
    Actual,
    Goal1,
    Goal2,
    Attainment1,
    Attainment2,
    LastUpdated,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 13] = [
        CanonicalField::Id,
        CanonicalField::Year,
        CanonicalField::Period,
        CanonicalField::MonthCode,
        CanonicalField::MonthLabel,
        CanonicalField::SellerCode,
        CanonicalField::SellerName,
        CanonicalField::Actual,
        CanonicalField::Goal1,
        CanonicalField::Goal2,
        CanonicalField::Attainment1,
        CanonicalField::Attainment2,
        CanonicalField::LastUpdated,
    ];

    /// 有序别名表
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Id => &["id", "ID", "Id"],
            CanonicalField::Year => &["año", "AÑO", "ano", "ANO", "anio", "ANIO", "Año", "year"],
            CanonicalField::Period => &["periodo", "PERIODO", "Periodo"],
            CanonicalField::MonthCode => &["mes", "MES", "Mes"],
            CanonicalField::MonthLabel => &["mes_nombre", "MES_NOMBRE", "nombre_mes", "NOMBRE_MES"],
            CanonicalField::SellerCode => &[
                "cod_vendedor",
                "COD_VENDEDOR",
                "codigo_vendedor",
                "CODIGO_VENDEDOR",
            ],
            CanonicalField::SellerName => &[
                "vendedor",
                "VENDEDOR",
                "nombre_vendedor",
                "NOMBRE_VENDEDOR",
            ],
            CanonicalField::Actual => &["ventas", "VENTAS", "Ventas"],
            CanonicalField::Goal1 => &["meta1", "META1", "meta", "META"],
            CanonicalField::Goal2 => &["meta2", "META2"],
            CanonicalField::Attainment1 => &[
                "cumplimiento1",
                "CUMPLIMIENTO1",
                "cumplimiento",
                "CUMPLIMIENTO",
            ],
            CanonicalField::Attainment2 => &["cumplimiento2", "CUMPLIMIENTO2"],
            CanonicalField::LastUpdated => &[
                "ultima_actualizacion",
                "ULTIMA_ACTUALIZACION",
                "fecha_actualizacion",
                "FECHA_ACTUALIZACION",
            ],
        }
    }

    /// 规范导出键
    pub fn canonical_key(self) -> &'static str {
        self.aliases()[0]
    }
}

pub struct FieldMapper;

impl FieldMapper {
    /// 按别名表查找字段值
    ///
    /// 命中条件: 键存在、值非 null、字符串值 TRIM 后非空
    pub fn lookup<'a>(&self, raw: &'a RawRecord, field: CanonicalField) -> Option<&'a Value> {
        field
            .aliases()
            .iter()
            .filter_map(|alias| raw.get(*alias))
            .find(|value| is_present(value))
    }

    /// 命中的别名（日志/调试用）
    pub fn matched_alias(&self, raw: &RawRecord, field: CanonicalField) -> Option<&'static str> {
        field
            .aliases()
            .iter()
            .copied()
            .find(|alias| raw.get(*alias).map(is_present).unwrap_or(false))
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}
