//! 字段分派表
//!
//! 以 (记录签名, 子记录签名) 为键，给出字段的二进制布局。
//! 先查记录专属规则，再查通用规则；同一键有多条规则时，
//! 取第一条长度匹配的（例如 CELL DATA 在不同游戏中为 u8 或 u16）。

use crate::datatypes::Signature;
use crate::field::{FieldContext, FieldKind, FieldValue};

/// 一条分派规则
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// `None` 表示适用于所有记录
    pub record: Option<Signature>,
    pub field: Signature,
    pub kind: FieldKind,
    pub name: &'static str,
}

const fn rule(record: &[u8; 4], field: &[u8; 4], kind: FieldKind, name: &'static str) -> FieldRule {
    FieldRule {
        record: Some(Signature::new(*record)),
        field: Signature::new(*field),
        kind,
        name,
    }
}

const fn common(field: &[u8; 4], kind: FieldKind, name: &'static str) -> FieldRule {
    FieldRule {
        record: None,
        field: Signature::new(*field),
        kind,
        name,
    }
}

const ZSTRING: FieldKind = FieldKind::ZString { max_len: None };
const LSTRING: FieldKind = FieldKind::LString { max_len: None };

// 定长结构
const HEDR: &[FieldKind] = &[FieldKind::F32, FieldKind::U32, FieldKind::U32];
const OBND: &[FieldKind] = &[
    FieldKind::I16, FieldKind::I16, FieldKind::I16,
    FieldKind::I16, FieldKind::I16, FieldKind::I16,
];
const XCLC: &[FieldKind] = &[FieldKind::I32, FieldKind::I32, FieldKind::U32];
const XCLC_SHORT: &[FieldKind] = &[FieldKind::I32, FieldKind::I32];
const POSITION: &[FieldKind] = &[
    FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::F32, FieldKind::F32,
];
const CTDA: &[FieldKind] = &[
    FieldKind::U8,
    FieldKind::Bytes(3),
    FieldKind::Bytes(4), // 比较值（浮点或 GLOB FormID）
    FieldKind::U32,
    FieldKind::Bytes(4),
    FieldKind::Bytes(4),
    FieldKind::U32,
    FieldKind::FormId,
];
const SCHR: &[FieldKind] = &[
    FieldKind::Bytes(4),
    FieldKind::U32, // 引用数量
    FieldKind::U32, // 编译后大小
    FieldKind::U32, // 变量数量
    FieldKind::U16, // 类型
    FieldKind::U16, // 标志
];
const DIAL_DATA: &[FieldKind] = &[FieldKind::U8, FieldKind::U8];
const INFO_DATA: &[FieldKind] = &[FieldKind::U8, FieldKind::U8, FieldKind::Bytes(2)];
const INFO_DATA_SHORT: &[FieldKind] = &[FieldKind::U8, FieldKind::U8];
const TRDT: &[FieldKind] = &[
    FieldKind::U32,
    FieldKind::I32,
    FieldKind::Bytes(4),
    FieldKind::U8,
    FieldKind::Bytes(3),
    FieldKind::FormId,
    FieldKind::U8,
    FieldKind::Bytes(3),
];
const QUST_DATA: &[FieldKind] = &[FieldKind::U8, FieldKind::U8, FieldKind::Bytes(2), FieldKind::F32];
const XRDO: &[FieldKind] = &[FieldKind::F32, FieldKind::U32, FieldKind::F32, FieldKind::FormId];
const WRLD_PNAM: &[FieldKind] = &[FieldKind::U8, FieldKind::Bytes(1)];
const PAIR_F32: &[FieldKind] = &[FieldKind::F32, FieldKind::F32];
const TRIPLE_F32: &[FieldKind] = &[FieldKind::F32, FieldKind::F32, FieldKind::F32];
const CNTO: &[FieldKind] = &[FieldKind::FormId, FieldKind::I32];
const ACBS: &[FieldKind] = &[
    FieldKind::U32, // 标志
    FieldKind::U16, // 疲劳
    FieldKind::U16, // 交易金额
    FieldKind::I16, // 等级
    FieldKind::U16, FieldKind::U16, FieldKind::U16,
    FieldKind::F32, FieldKind::I16, FieldKind::U16,
];
const AIDT: &[FieldKind] = &[
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::Bytes(3),
    FieldKind::U32, // 服务标志
    FieldKind::I8, FieldKind::U8, FieldKind::I8, FieldKind::U8,
    FieldKind::I32,
];
const COED: &[FieldKind] = &[FieldKind::FormId, FieldKind::Bytes(4), FieldKind::F32];
const SLSD: &[FieldKind] = &[FieldKind::U32, FieldKind::Bytes(12), FieldKind::U8, FieldKind::Bytes(7)];

// 记录专属结构
const ADDN_DNAM: &[FieldKind] = &[FieldKind::U16, FieldKind::Bytes(2)];
const ALCH_ENIT: &[FieldKind] = &[
    FieldKind::I32, FieldKind::U8, FieldKind::Bytes(3), FieldKind::FormId, FieldKind::F32, FieldKind::FormId,
];
const CELL_XCLL: &[FieldKind] = &[
    FieldKind::Bytes(4), FieldKind::Bytes(4), FieldKind::Bytes(4), FieldKind::F32, FieldKind::F32, FieldKind::I32,
    FieldKind::I32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
];
const CHAL_DATA: &[FieldKind] = &[
    FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::Bytes(2), FieldKind::Bytes(2),
    FieldKind::Bytes(4),
];
const CONT_DATA: &[FieldKind] = &[FieldKind::U8, FieldKind::F32];
const FACTION_RANK: &[FieldKind] = &[FieldKind::FormId, FieldKind::U8, FieldKind::Bytes(3)];
const CREA_DATA: &[FieldKind] = &[
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::I16, FieldKind::Bytes(2),
    FieldKind::I16, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::U8,
];
const EXPL_DATA: &[FieldKind] = &[
    FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::FormId, FieldKind::FormId, FieldKind::U32,
    FieldKind::F32, FieldKind::FormId, FieldKind::FormId, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::U32,
];
const FACT_DATA: &[FieldKind] = &[FieldKind::U8, FieldKind::U8, FieldKind::Bytes(2)];
const IMAD_DNAM: &[FieldKind] = &[
    FieldKind::U32, FieldKind::F32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
    FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
    FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
    FieldKind::Bytes(72), FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
    FieldKind::U32, FieldKind::Bytes(8), FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
    FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
    FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
    FieldKind::U32,
];
const VALUE_WEIGHT: &[FieldKind] = &[FieldKind::I32, FieldKind::F32];
const LVLO: &[FieldKind] = &[
    FieldKind::I16, FieldKind::Bytes(2), FieldKind::FormId, FieldKind::I16, FieldKind::Bytes(2),
];
const MGEF_DATA: &[FieldKind] = &[
    FieldKind::U32, FieldKind::F32, FieldKind::FormId, FieldKind::I32, FieldKind::I32, FieldKind::U16,
    FieldKind::Bytes(2), FieldKind::FormId, FieldKind::F32, FieldKind::FormId, FieldKind::FormId, FieldKind::FormId,
    FieldKind::FormId, FieldKind::FormId, FieldKind::FormId, FieldKind::F32, FieldKind::F32, FieldKind::U32,
    FieldKind::I32,
];
const NAVM_DATA: &[FieldKind] = &[
    FieldKind::FormId, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32,
];
const NPC_DATA: &[FieldKind] = &[
    FieldKind::I32, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::U8,
];
const NPC_DATA_LONG: &[FieldKind] = &[
    FieldKind::I32, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::U8, FieldKind::U8,
];
const NPC_DNAM: &[FieldKind] = &[
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
];
const PKDT: &[FieldKind] = &[
    FieldKind::U32, FieldKind::U8, FieldKind::Bytes(1), FieldKind::U16, FieldKind::U16, FieldKind::Bytes(2),
];
const PLDT: &[FieldKind] = &[FieldKind::U32, FieldKind::FormId, FieldKind::I32];
const PSDT: &[FieldKind] = &[
    FieldKind::I8, FieldKind::I8, FieldKind::U8, FieldKind::I8, FieldKind::I32,
];
const PTDT: &[FieldKind] = &[FieldKind::I32, FieldKind::FormId, FieldKind::I32, FieldKind::F32];
const PKDD: &[FieldKind] = &[
    FieldKind::F32, FieldKind::FormId, FieldKind::U32, FieldKind::Bytes(4), FieldKind::U32, FieldKind::Bytes(4),
];
const PERK_DATA: &[FieldKind] = &[
    FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8,
];
const PERK_QUEST_STAGE: &[FieldKind] = &[FieldKind::FormId, FieldKind::I8, FieldKind::Bytes(3)];
const PERK_ENTRY_POINT: &[FieldKind] = &[FieldKind::U8, FieldKind::U8, FieldKind::U8];
const QSTA: &[FieldKind] = &[FieldKind::FormId, FieldKind::U8, FieldKind::Bytes(3)];
const RCPE_DATA: &[FieldKind] = &[FieldKind::I32, FieldKind::U32, FieldKind::FormId, FieldKind::FormId];
const XPRM: &[FieldKind] = &[
    FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::Bytes(4), FieldKind::U32,
];
const XTEL: &[FieldKind] = &[
    FieldKind::FormId, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::U32,
];
const MAP_MARKER: &[FieldKind] = &[FieldKind::U8, FieldKind::Bytes(1)];
const XLOC: &[FieldKind] = &[
    FieldKind::U8, FieldKind::Bytes(3), FieldKind::FormId, FieldKind::U8, FieldKind::Bytes(11),
];
const XNDP: &[FieldKind] = &[FieldKind::FormId, FieldKind::Bytes(4)];
const SNDD: &[FieldKind] = &[
    FieldKind::U8, FieldKind::U8, FieldKind::I8, FieldKind::Bytes(1), FieldKind::U32, FieldKind::I16,
    FieldKind::U8, FieldKind::U8, FieldKind::I16, FieldKind::I16, FieldKind::I16, FieldKind::I16,
    FieldKind::I16, FieldKind::I16, FieldKind::I32, FieldKind::Bytes(8),
];
const SNDD_LONG: &[FieldKind] = &[
    FieldKind::U8, FieldKind::U8, FieldKind::I8, FieldKind::Bytes(1), FieldKind::U32, FieldKind::I16,
    FieldKind::U8, FieldKind::U8, FieldKind::I16, FieldKind::I16, FieldKind::I16, FieldKind::I16,
    FieldKind::I16, FieldKind::I16, FieldKind::I32, FieldKind::Bytes(8), FieldKind::Bytes(8),
];
const SPIT: &[FieldKind] = &[
    FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U8, FieldKind::Bytes(3),
];
const EFIT: &[FieldKind] = &[
    FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::U32, FieldKind::I32,
];
const DODT: &[FieldKind] = &[
    FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::U8, FieldKind::U8, FieldKind::Bytes(2), FieldKind::Bytes(4),
];
const WEAP_DATA: &[FieldKind] = &[
    FieldKind::I32, FieldKind::I32, FieldKind::F32, FieldKind::I16, FieldKind::U8,
];
const WEAP_DNAM: &[FieldKind] = &[
    FieldKind::U32, FieldKind::F32, FieldKind::F32, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::F32, FieldKind::F32, FieldKind::Bytes(4), FieldKind::F32, FieldKind::Bytes(4),
    FieldKind::FormId, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::F32,
    FieldKind::F32, FieldKind::U32, FieldKind::U32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::F32, FieldKind::I32, FieldKind::U32, FieldKind::F32, FieldKind::F32,
    FieldKind::I32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
];
const WEAP_DNAM_NV: &[FieldKind] = &[
    FieldKind::U32, FieldKind::F32, FieldKind::F32, FieldKind::U8, FieldKind::U8, FieldKind::U8,
    FieldKind::U8, FieldKind::F32, FieldKind::F32, FieldKind::Bytes(4), FieldKind::F32, FieldKind::Bytes(4),
    FieldKind::FormId, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::U8, FieldKind::F32,
    FieldKind::F32, FieldKind::U32, FieldKind::U32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::F32, FieldKind::I32, FieldKind::U32, FieldKind::F32, FieldKind::F32,
    FieldKind::I32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::U32,
    FieldKind::U32, FieldKind::U32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::U32,
    FieldKind::U32, FieldKind::Bytes(1), FieldKind::U8, FieldKind::Bytes(2), FieldKind::F32, FieldKind::F32,
    FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::U32,
];
const CRDT: &[FieldKind] = &[
    FieldKind::U16, FieldKind::Bytes(2), FieldKind::F32, FieldKind::U8, FieldKind::Bytes(3), FieldKind::FormId,
];
const WEAP_VATS: &[FieldKind] = &[
    FieldKind::FormId, FieldKind::F32, FieldKind::F32, FieldKind::F32, FieldKind::U8, FieldKind::U8,
    FieldKind::Bytes(2),
];
const WRLD_MNAM: &[FieldKind] = &[
    FieldKind::I32, FieldKind::I32, FieldKind::I16, FieldKind::I16, FieldKind::I16, FieldKind::I16,
];

/// 分派规则表（专属规则在前）
pub static FIELD_RULES: &[FieldRule] = &[
    // TES4
    rule(b"TES4", b"HEDR", FieldKind::Struct(HEDR), "Header"),
    rule(b"TES4", b"CNAM", FieldKind::ZString { max_len: Some(511) }, "Author"),
    rule(b"TES4", b"SNAM", FieldKind::ZString { max_len: Some(511) }, "Description"),
    rule(b"TES4", b"MAST", ZSTRING, "Master"),
    rule(b"TES4", b"DATA", FieldKind::U64, "Master Size"),
    rule(b"TES4", b"ONAM", FieldKind::FormIdArray, "Overridden Forms"),
    rule(b"TES4", b"INTV", FieldKind::U32, "Internal Version"),
    rule(b"TES4", b"INCC", FieldKind::U32, "Internal Cell Count"),
    // GMST
    rule(b"GMST", b"DATA", FieldKind::GameSetting, "Value"),
    // GLOB
    rule(b"GLOB", b"FNAM", FieldKind::U8, "Type"),
    rule(b"GLOB", b"FLTV", FieldKind::F32, "Value"),
    // ACHR
    rule(b"ACHR", b"NAME", FieldKind::FormId, "Base"),
    rule(b"ACHR", b"DATA", FieldKind::Struct(POSITION), "Position/Rotation"),
    rule(b"ACHR", b"XEZN", FieldKind::FormId, "Encounter Zone"),
    rule(b"ACHR", b"XRGD", FieldKind::Raw, "Ragdoll Data"),
    rule(b"ACHR", b"XRGB", FieldKind::Raw, "Ragdoll Biped Data"),
    rule(b"ACHR", b"XPRD", FieldKind::F32, "Idle Time"),
    rule(b"ACHR", b"INAM", FieldKind::FormId, "Idle"),
    rule(b"ACHR", b"TNAM", FieldKind::FormId, "Topic"),
    rule(b"ACHR", b"XMRC", FieldKind::FormId, "Merchant Container"),
    rule(b"ACHR", b"XRDS", FieldKind::F32, "Radius"),
    rule(b"ACHR", b"XHLP", FieldKind::F32, "Health"),
    rule(b"ACHR", b"XLKR", FieldKind::FormId, "Linked reference"),
    rule(b"ACHR", b"XEMI", FieldKind::FormId, "Emittance"),
    rule(b"ACHR", b"XMBR", FieldKind::FormId, "MultiBound Reference"),
    // ACRE
    rule(b"ACRE", b"NAME", FieldKind::FormId, "Base"),
    rule(b"ACRE", b"DATA", FieldKind::Struct(POSITION), "Position/Rotation"),
    rule(b"ACRE", b"XEZN", FieldKind::FormId, "Encounter Zone"),
    rule(b"ACRE", b"XRGD", FieldKind::Raw, "Ragdoll Data"),
    rule(b"ACRE", b"XRGB", FieldKind::Raw, "Ragdoll Biped Data"),
    rule(b"ACRE", b"XPRD", FieldKind::F32, "Idle Time"),
    rule(b"ACRE", b"XPPA", FieldKind::Marker, "Patrol Script Marker"),
    rule(b"ACRE", b"INAM", FieldKind::FormId, "Idle"),
    rule(b"ACRE", b"TNAM", FieldKind::FormId, "Topic"),
    rule(b"ACRE", b"XLCM", FieldKind::I32, "Level Modifier"),
    rule(b"ACRE", b"XOWN", FieldKind::FormId, "Owner"),
    rule(b"ACRE", b"XRNK", FieldKind::I32, "Faction rank"),
    rule(b"ACRE", b"XMRC", FieldKind::FormId, "Merchant Container"),
    rule(b"ACRE", b"XCNT", FieldKind::I32, "Count"),
    rule(b"ACRE", b"XRDS", FieldKind::F32, "Radius"),
    rule(b"ACRE", b"XHLP", FieldKind::F32, "Health"),
    rule(b"ACRE", b"XLKR", FieldKind::FormId, "Linked Reference"),
    rule(b"ACRE", b"XAPD", FieldKind::U8, "Activate parents flags"),
    rule(b"ACRE", b"XATO", ZSTRING, "Activation Prompt"),
    rule(b"ACRE", b"XEMI", FieldKind::FormId, "Emittance"),
    rule(b"ACRE", b"XMBR", FieldKind::FormId, "MultiBound Reference"),
    // ACTI
    rule(b"ACTI", b"SNAM", FieldKind::FormId, "Sound - Looping"),
    rule(b"ACTI", b"VNAM", FieldKind::FormId, "Sound - Activation"),
    rule(b"ACTI", b"INAM", FieldKind::FormId, "Radio Template"),
    rule(b"ACTI", b"RNAM", FieldKind::FormId, "Radio Station"),
    rule(b"ACTI", b"WNAM", FieldKind::FormId, "Water Type"),
    rule(b"ACTI", b"XATO", ZSTRING, "Activation Prompt"),
    // ADDN
    rule(b"ADDN", b"DATA", FieldKind::I32, "Node Index"),
    rule(b"ADDN", b"DNAM", FieldKind::Struct(ADDN_DNAM), "Effect Data"),
    // ALCH
    rule(b"ALCH", b"YNAM", FieldKind::FormId, "Sound - Pick Up"),
    rule(b"ALCH", b"ZNAM", FieldKind::FormId, "Sound - Drop"),
    rule(b"ALCH", b"ETYP", FieldKind::I32, "Equipment Type"),
    rule(b"ALCH", b"DATA", FieldKind::F32, "Weight"),
    rule(b"ALCH", b"ENIT", FieldKind::Struct(ALCH_ENIT), "Effect Data"),
    rule(b"ALCH", b"EFID", FieldKind::FormId, "Base Effect"),
    rule(b"ALCH", b"EFIT", FieldKind::Struct(EFIT), "Effect Data"),
    // ALOC
    rule(b"ALOC", b"NAM1", FieldKind::Raw, "Unknown"),
    rule(b"ALOC", b"NAM2", FieldKind::Raw, "Unknown"),
    rule(b"ALOC", b"NAM3", FieldKind::Raw, "Unknown"),
    rule(b"ALOC", b"NAM4", FieldKind::F32, "Location Delay"),
    rule(b"ALOC", b"NAM5", FieldKind::U32, "Day Start"),
    rule(b"ALOC", b"NAM6", FieldKind::U32, "Night Start"),
    rule(b"ALOC", b"NAM7", FieldKind::F32, "Retrigger Delay"),
    rule(b"ALOC", b"HNAM", FieldKind::FormId, "Neutral Media Set"),
    rule(b"ALOC", b"ZNAM", FieldKind::FormId, "Ally Media Set"),
    rule(b"ALOC", b"XNAM", FieldKind::FormId, "Friend Media Set"),
    rule(b"ALOC", b"YNAM", FieldKind::FormId, "Enemy Media Set"),
    rule(b"ALOC", b"LNAM", FieldKind::FormId, "Location Media Set"),
    rule(b"ALOC", b"GNAM", FieldKind::FormId, "Battle Media Set"),
    rule(b"ALOC", b"RNAM", FieldKind::FormId, "Conditional Faction"),
    rule(b"ALOC", b"FNAM", FieldKind::Raw, "Unknown"),
    // AMMO
    rule(b"AMMO", b"YNAM", FieldKind::FormId, "Sound - Pick Up"),
    rule(b"AMMO", b"ZNAM", FieldKind::FormId, "Sound - Drop"),
    rule(b"AMMO", b"ONAM", ZSTRING, "Short Name"),
    rule(b"AMMO", b"QNAM", ZSTRING, "Abbreviation"),
    rule(b"AMMO", b"RCIL", FieldKind::FormId, "Ammo Effect"),
    // ARMA
    rule(b"ARMA", b"ICO2", ZSTRING, "Female inventory icon filename"),
    rule(b"ARMA", b"MIC2", ZSTRING, "Female message icon filename"),
    rule(b"ARMA", b"ETYP", FieldKind::I32, "Equipment Type"),
    // ARMO
    rule(b"ARMO", b"EITM", FieldKind::FormId, "Object Effect"),
    rule(b"ARMO", b"ICO2", ZSTRING, "Female inventory icon filename"),
    rule(b"ARMO", b"MIC2", ZSTRING, "Female message icon filename"),
    rule(b"ARMO", b"BMCT", ZSTRING, "Ragdoll Constraint Template"),
    rule(b"ARMO", b"REPL", FieldKind::FormId, "Repair List"),
    rule(b"ARMO", b"BIPL", FieldKind::FormId, "Biped Model List"),
    rule(b"ARMO", b"ETYP", FieldKind::I32, "Equipment Type"),
    rule(b"ARMO", b"YNAM", FieldKind::FormId, "Sound - Pick Up"),
    rule(b"ARMO", b"ZNAM", FieldKind::FormId, "Sound - Drop"),
    rule(b"ARMO", b"BNAM", FieldKind::U32, "Overrides Animation Sounds"),
    rule(b"ARMO", b"TNAM", FieldKind::FormId, "Animation Sounds Template"),
    // ASPC
    rule(b"ASPC", b"SNAM", FieldKind::FormId, "Dawn / Default Loop, or Afternoon, or Dusk, or Night, or Walla"),
    rule(b"ASPC", b"WNAM", FieldKind::U32, "Walla Trigger Count"),
    rule(b"ASPC", b"RDAT", FieldKind::FormId, "Use Sound from Region (Interiors Only)"),
    rule(b"ASPC", b"ANAM", FieldKind::U32, "Environment Type"),
    rule(b"ASPC", b"INAM", FieldKind::U32, "Is Interior"),
    // BOOK
    rule(b"BOOK", b"YNAM", FieldKind::FormId, "Sound - Pick Up"),
    rule(b"BOOK", b"ZNAM", FieldKind::FormId, "Sound - Drop"),
    // CELL
    rule(b"CELL", b"DATA", FieldKind::U8, "Flags"),
    rule(b"CELL", b"DATA", FieldKind::U16, "Flags"),
    rule(b"CELL", b"XCLC", FieldKind::Struct(XCLC), "Grid"),
    rule(b"CELL", b"XCLC", FieldKind::Struct(XCLC_SHORT), "Grid"),
    rule(b"CELL", b"LTMP", FieldKind::FormId, "Lighting Template"),
    rule(b"CELL", b"LNAM", FieldKind::U32, "Lighting Template Flags"),
    rule(b"CELL", b"XCLW", FieldKind::F32, "Water Height"),
    rule(b"CELL", b"XNAM", ZSTRING, "Water Noise Texture"),
    rule(b"CELL", b"XCWT", FieldKind::FormId, "Water"),
    rule(b"CELL", b"XEZN", FieldKind::FormId, "Encounter Zone"),
    rule(b"CELL", b"XCCM", FieldKind::FormId, "Climate"),
    rule(b"CELL", b"XCLR", FieldKind::FormIdArray, "Regions"),
    rule(b"CELL", b"XCLL", FieldKind::Struct(CELL_XCLL), "Lighting"),
    rule(b"CELL", b"XCIM", FieldKind::FormId, "Image Space"),
    rule(b"CELL", b"XOWN", FieldKind::FormId, "Owner"),
    rule(b"CELL", b"XRNK", FieldKind::I32, "Faction rank"),
    rule(b"CELL", b"XCAS", FieldKind::FormId, "Acoustic space"),
    rule(b"CELL", b"XCMO", FieldKind::FormId, "Music type"),
    // CHAL
    rule(b"CHAL", b"DATA", FieldKind::Struct(CHAL_DATA), "Data"),
    rule(b"CHAL", b"SNAM", FieldKind::FormId, "Value3"),
    rule(b"CHAL", b"XNAM", FieldKind::FormId, "Value4"),
    // CONT
    rule(b"CONT", b"CNTO", FieldKind::Struct(CNTO), "Item"),
    rule(b"CONT", b"DATA", FieldKind::Struct(CONT_DATA), "Data"),
    rule(b"CONT", b"SNAM", FieldKind::FormId, "Sound - open"),
    rule(b"CONT", b"QNAM", FieldKind::FormId, "Sound - close"),
    rule(b"CONT", b"RNAM", FieldKind::FormId, "Sound - random/looping (New Vegas only)"),
    rule(b"CONT", b"COED", FieldKind::Struct(COED), "Extra Data"),
    // CREA
    rule(b"CREA", b"CNTO", FieldKind::Struct(CNTO), "Item"),
    rule(b"CREA", b"SPLO", FieldKind::FormId, "Actor Effect"),
    rule(b"CREA", b"EITM", FieldKind::FormId, "Unarmed Attack Effect"),
    rule(b"CREA", b"EAMT", FieldKind::U16, "Unarmed Attack Animation"),
    rule(b"CREA", b"NIFZ", FieldKind::Raw, "Model List"),
    rule(b"CREA", b"NIFT", FieldKind::Raw, "Texture File Hashes"),
    rule(b"CREA", b"SNAM", FieldKind::Struct(FACTION_RANK), "Faction"),
    rule(b"CREA", b"INAM", FieldKind::FormId, "Death Item"),
    rule(b"CREA", b"VTCK", FieldKind::FormId, "Voice"),
    rule(b"CREA", b"TPLT", FieldKind::FormId, "Template"),
    rule(b"CREA", b"PKID", FieldKind::FormId, "Package"),
    rule(b"CREA", b"KFFZ", FieldKind::Raw, "Animatons"),
    rule(b"CREA", b"DATA", FieldKind::Struct(CREA_DATA), "Data"),
    rule(b"CREA", b"RNAM", FieldKind::U8, "Attack Reach"),
    rule(b"CREA", b"ZNAM", FieldKind::FormId, "Combat Style"),
    rule(b"CREA", b"PNAM", FieldKind::FormId, "Body Part Data"),
    rule(b"CREA", b"TNAM", FieldKind::F32, "Turning Speed"),
    rule(b"CREA", b"BNAM", FieldKind::F32, "Base Scale"),
    rule(b"CREA", b"WNAM", FieldKind::F32, "Foot Weight"),
    rule(b"CREA", b"NAM4", FieldKind::U32, "Impact Material Type"),
    rule(b"CREA", b"NAM5", FieldKind::U32, "Sound Level"),
    rule(b"CREA", b"CSCR", FieldKind::FormId, "FormID of a CREA record to inherit sounds from"),
    rule(b"CREA", b"CSDT", FieldKind::U32, "Sound Type"),
    rule(b"CREA", b"CSDI", FieldKind::FormId, "Sound"),
    rule(b"CREA", b"CSDC", FieldKind::U8, "Sound Chance"),
    rule(b"CREA", b"CNAM", FieldKind::FormId, "Impact Dataset"),
    rule(b"CREA", b"LNAM", FieldKind::FormId, "Melee Weapon List"),
    rule(b"CREA", b"ACBS", FieldKind::Struct(ACBS), "Configuration"),
    rule(b"CREA", b"AIDT", FieldKind::Struct(AIDT), "AI Data"),
    rule(b"CREA", b"COED", FieldKind::Struct(COED), "Extra Data"),
    // CSNO
    rule(b"CSNO", b"MOD2", ZSTRING, "Slot Machine Model"),
    rule(b"CSNO", b"MOD3", ZSTRING, "BlackJack Table Model"),
    rule(b"CSNO", b"MOD4", ZSTRING, "Roulette Table Model"),
    rule(b"CSNO", b"ICO2", ZSTRING, "BlackJack Texture - Deck 4"),
    // DIAL
    rule(b"DIAL", b"QSTI", FieldKind::FormId, "Quest"),
    rule(b"DIAL", b"PNAM", FieldKind::F32, "Priority"),
    rule(b"DIAL", b"DATA", FieldKind::Struct(DIAL_DATA), "Type And Flags"),
    rule(b"DIAL", b"TIFC", FieldKind::U32, "Info Count"),
    rule(b"DIAL", b"INFC", FieldKind::FormId, "Info connection (New Vegas Only)"),
    rule(b"DIAL", b"INFX", FieldKind::I32, "Info index"),
    // DOOR
    rule(b"DOOR", b"SNAM", FieldKind::FormId, "Sound - open"),
    rule(b"DOOR", b"ANAM", FieldKind::FormId, "Sound - close"),
    rule(b"DOOR", b"BNAM", FieldKind::FormId, "Sound - looping"),
    rule(b"DOOR", b"FNAM", FieldKind::U8, "Flags"),
    // EXPL
    rule(b"EXPL", b"EITM", FieldKind::FormId, "Object Effect"),
    rule(b"EXPL", b"MNAM", FieldKind::FormId, "Image Space Modifier"),
    rule(b"EXPL", b"DATA", FieldKind::Struct(EXPL_DATA), "Data"),
    rule(b"EXPL", b"INAM", FieldKind::FormId, "Placed Impact Object"),
    // FACT
    rule(b"FACT", b"DATA", FieldKind::Struct(FACT_DATA), "Data"),
    rule(b"FACT", b"CNAM", FieldKind::F32, "Unused"),
    rule(b"FACT", b"RNAM", FieldKind::I32, "Rank Number"),
    rule(b"FACT", b"MNAM", ZSTRING, "Male"),
    rule(b"FACT", b"FNAM", ZSTRING, "Male"),
    rule(b"FACT", b"INAM", ZSTRING, "Insignia (unused)"),
    // IDLM
    rule(b"IDLM", b"IDLF", FieldKind::U8, "Flags"),
    rule(b"IDLM", b"IDLT", FieldKind::F32, "Idle Timer Setting"),
    // IMAD
    rule(b"IMAD", b"DNAM", FieldKind::Struct(IMAD_DNAM), "Data Count"),
    rule(b"IMAD", b"BNAM", FieldKind::Raw, "Blur Radius"),
    rule(b"IMAD", b"VNAM", FieldKind::Raw, "Double Vision Strength"),
    rule(b"IMAD", b"TNAM", FieldKind::Raw, "Tint Color"),
    rule(b"IMAD", b"NAM3", FieldKind::Raw, "Fade Color"),
    rule(b"IMAD", b"RNAM", FieldKind::Raw, "Radial Blur Strength"),
    rule(b"IMAD", b"SNAM", FieldKind::Raw, "Radial Blur Ramp Up"),
    rule(b"IMAD", b"UNAM", FieldKind::Raw, "Radial Blur Start"),
    rule(b"IMAD", b"NAM1", FieldKind::Raw, "Radial Blur Ramp Down"),
    rule(b"IMAD", b"NAM2", FieldKind::Raw, "Radial Blur Down Start"),
    rule(b"IMAD", b"WNAM", FieldKind::Raw, "DoF Strength"),
    rule(b"IMAD", b"XNAM", FieldKind::Raw, "DoF Distance"),
    rule(b"IMAD", b"YNAM", FieldKind::Raw, "DoF Range"),
    rule(b"IMAD", b"NAM4", FieldKind::Raw, "Motion Blur Strength"),
    rule(b"IMAD", b"AIAD", FieldKind::Raw, "HDR Bloom Blur Radius Add"),
    rule(b"IMAD", b"BIAD", FieldKind::Raw, "HDR Bloom Threshold Add"),
    rule(b"IMAD", b"CIAD", FieldKind::Raw, "HDR Bloom Scale Add"),
    rule(b"IMAD", b"DIAD", FieldKind::Raw, "HDR Target Lum Min Add"),
    rule(b"IMAD", b"EIAD", FieldKind::Raw, "HDR Target Lum Max Add"),
    rule(b"IMAD", b"FIAD", FieldKind::Raw, "HDR Sunlight Scale Add"),
    rule(b"IMAD", b"GIAD", FieldKind::Raw, "HDR Sky Scale Add"),
    rule(b"IMAD", b"HIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"IIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"JIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"KIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"LIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"MIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"NIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"OIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"PIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"QIAD", FieldKind::Raw, "Cinematic Saturation Add"),
    rule(b"IMAD", b"RIAD", FieldKind::Raw, "Cinematic Brightness Add"),
    rule(b"IMAD", b"SIAD", FieldKind::Raw, "Cinematic Contrast Add"),
    rule(b"IMAD", b"TIAD", FieldKind::Raw, "Unknown"),
    rule(b"IMAD", b"RDSD", FieldKind::FormId, "Sound - Intro"),
    rule(b"IMAD", b"RDSI", FieldKind::FormId, "Sound - Outro"),
    // INFO
    rule(b"INFO", b"DATA", FieldKind::Struct(INFO_DATA), "Type And Next Speaker"),
    rule(b"INFO", b"DATA", FieldKind::Struct(INFO_DATA_SHORT), "Type And Next Speaker"),
    rule(b"INFO", b"QSTI", FieldKind::FormId, "Quest"),
    rule(b"INFO", b"PNAM", FieldKind::FormId, "Previous Info"),
    rule(b"INFO", b"TRDT", FieldKind::Struct(TRDT), "Response Data"),
    rule(b"INFO", b"NAM1", LSTRING, "Response Text"),
    rule(b"INFO", b"NAM2", ZSTRING, "Script Notes"),
    rule(b"INFO", b"NAM3", ZSTRING, "Edits"),
    rule(b"INFO", b"TCLT", FieldKind::FormId, "Choice"),
    rule(b"INFO", b"TCLF", FieldKind::FormId, "Link From"),
    rule(b"INFO", b"NEXT", FieldKind::Marker, "Script Separator"),
    rule(b"INFO", b"ANAM", FieldKind::FormId, "Speaker"),
    rule(b"INFO", b"RNAM", LSTRING, "Prompt"),
    rule(b"INFO", b"TPIC", FieldKind::FormId, "Topic"),
    rule(b"INFO", b"NAME", FieldKind::FormId, "Topic"),
    rule(b"INFO", b"SNDD", FieldKind::FormId, "Unused"),
    rule(b"INFO", b"KNAM", FieldKind::FormId, "Actor Value / Perk"),
    rule(b"INFO", b"DNAM", FieldKind::U32, "Speech Challenge"),
    rule(b"INFO", b"TCFU", FieldKind::FormId, "Unknown (New Vegas Only)"),
    // IPCT
    rule(b"IPCT", b"DNAM", FieldKind::FormId, "Texture Set"),
    rule(b"IPCT", b"SNAM", FieldKind::FormId, "Sound 1"),
    rule(b"IPCT", b"NAM1", FieldKind::FormId, "Sound 2"),
    // KEYM
    rule(b"KEYM", b"YNAM", FieldKind::FormId, "Sound - Pick Up"),
    rule(b"KEYM", b"ZNAM", FieldKind::FormId, "Sound - Drop"),
    rule(b"KEYM", b"DATA", FieldKind::Struct(VALUE_WEIGHT), "DATA"),
    // LVLI
    rule(b"LVLI", b"CNTO", FieldKind::Struct(CNTO), "Item"),
    rule(b"LVLI", b"LVLD", FieldKind::U8, "Chance"),
    rule(b"LVLI", b"LVLF", FieldKind::U8, "Flags"),
    rule(b"LVLI", b"LVLG", FieldKind::FormId, "Global"),
    rule(b"LVLI", b"LVLO", FieldKind::Struct(LVLO), "Leveled List Entry"),
    rule(b"LVLI", b"COED", FieldKind::Struct(COED), "Extra Data"),
    // MESG
    rule(b"MESG", b"INAM", FieldKind::FormId, "Icon"),
    rule(b"MESG", b"DNAM", FieldKind::U32, "Flags"),
    rule(b"MESG", b"TNAM", FieldKind::U32, "Display Time"),
    rule(b"MESG", b"ITXT", ZSTRING, "Button Text"),
    // MGEF
    rule(b"MGEF", b"DATA", FieldKind::Struct(MGEF_DATA), "Data"),
    // MSET
    rule(b"MSET", b"NAM1", FieldKind::U32, "Type"),
    rule(b"MSET", b"NAM2", ZSTRING, "Loop (Battle) / Battle (Dungeon) / Day Outer (Location)"),
    rule(b"MSET", b"NAM3", ZSTRING, "Explore (Dungeon) / Day Middle (Location)"),
    rule(b"MSET", b"NAM4", ZSTRING, "Suspense (Dungeon) / Day Inner (Location)"),
    rule(b"MSET", b"NAM5", ZSTRING, "Night Outer (Location)"),
    rule(b"MSET", b"NAM6", ZSTRING, "Night Middle (Location)"),
    rule(b"MSET", b"NAM7", ZSTRING, "Night Inner (Location)"),
    rule(b"MSET", b"NAM8", FieldKind::F32, "Loop dB (Battle) / Battle dB (Dungeon) / Day Outer dB (Location)"),
    rule(b"MSET", b"NAM9", FieldKind::F32, "Explore dB (Dungeon) / Day Middle dB (Location)"),
    rule(b"MSET", b"NAM0", FieldKind::F32, "Suspense dB (Dungeon) / Day Inner dB (Location)"),
    rule(b"MSET", b"ANAM", FieldKind::F32, "Night Outer dB (Location)"),
    rule(b"MSET", b"BNAM", FieldKind::F32, "Night Middle dB (Location)"),
    rule(b"MSET", b"CNAM", FieldKind::F32, "Night Inner dB (Location)"),
    rule(b"MSET", b"JNAM", FieldKind::F32, "Day/Night Outer/Middle/Inner Boundary % (Location)"),
    rule(b"MSET", b"PNAM", FieldKind::U8, "Enable Flags"),
    rule(b"MSET", b"DNAM", FieldKind::F32, "Wait Time (Battle) / Min Time On (Dungeon, Location) / Daytime Min (Incidental)"),
    rule(b"MSET", b"ENAM", FieldKind::F32, "Loop Fade Out (Battle) / Looping/Random Crossfade Overlap (Dungeon, Location) / Nighttime Min (Incidental)"),
    rule(b"MSET", b"FNAM", FieldKind::F32, "Recovery Time (Battle) / Layer Crossfade Time (Dungeon, Location) / Daytime Max (Incidental)"),
    rule(b"MSET", b"GNAM", FieldKind::F32, "Nighttime Max (Incidental)"),
    rule(b"MSET", b"HNAM", FieldKind::FormId, "Intro (Battle, Dungeon) / Daytime (Incidental)"),
    rule(b"MSET", b"INAM", FieldKind::FormId, "Outro (Battle, Dungeon) / Nighttime (Incidental)"),
    rule(b"MSET", b"KNAM", FieldKind::F32, "Unknown"),
    rule(b"MSET", b"LNAM", FieldKind::F32, "Unknown"),
    rule(b"MSET", b"MNAM", FieldKind::F32, "Unknown"),
    rule(b"MSET", b"NNAM", FieldKind::F32, "Unknown"),
    rule(b"MSET", b"ONAM", FieldKind::F32, "Unknown"),
    rule(b"MSET", b"DATA", FieldKind::Raw, "Unknown"),
    // NAVI
    rule(b"NAVI", b"NVER", FieldKind::U32, "Version"),
    rule(b"NAVI", b"NVMI", FieldKind::Raw, "Navigation Map Info"),
    rule(b"NAVI", b"NVCI", FieldKind::FormIdArray, "Unknown"),
    // NAVM
    rule(b"NAVM", b"NVER", FieldKind::U32, "Version"),
    rule(b"NAVM", b"DATA", FieldKind::Struct(NAVM_DATA), "Data"),
    rule(b"NAVM", b"NVVX", FieldKind::Raw, "Vertices"),
    rule(b"NAVM", b"NVTR", FieldKind::Raw, "Triangles"),
    rule(b"NAVM", b"NVCA", FieldKind::Raw, "Unknown"),
    rule(b"NAVM", b"NVDP", FieldKind::Raw, "Doors"),
    rule(b"NAVM", b"NVGD", FieldKind::Raw, "NavMesh Grid"),
    // NOTE
    rule(b"NOTE", b"YNAM", FieldKind::FormId, "Sound - Pick Up"),
    rule(b"NOTE", b"ZNAM", FieldKind::FormId, "Sound - Drop"),
    rule(b"NOTE", b"DATA", FieldKind::U8, "Type"),
    rule(b"NOTE", b"ONAM", FieldKind::FormId, "Quest"),
    rule(b"NOTE", b"XNAM", ZSTRING, "Texture"),
    rule(b"NOTE", b"TNAM", FieldKind::Raw, "Text / Topic"),
    rule(b"NOTE", b"SNAM", FieldKind::FormId, "Sound / NPC"),
    // NPC_
    rule(b"NPC_", b"CNTO", FieldKind::Struct(CNTO), "Item"),
    rule(b"NPC_", b"INAM", FieldKind::FormId, "Death Item"),
    rule(b"NPC_", b"VTCK", FieldKind::FormId, "Voice"),
    rule(b"NPC_", b"TPLT", FieldKind::FormId, "Template"),
    rule(b"NPC_", b"RNAM", FieldKind::FormId, "Race"),
    rule(b"NPC_", b"EITM", FieldKind::FormId, "Unarmed Attack Effect"),
    rule(b"NPC_", b"EAMT", FieldKind::U16, "Unarmed Attack Animation"),
    rule(b"NPC_", b"CNAM", FieldKind::FormId, "Class"),
    rule(b"NPC_", b"DATA", FieldKind::Struct(NPC_DATA), "Health and SPECIAL"),
    rule(b"NPC_", b"DATA", FieldKind::Struct(NPC_DATA_LONG), "Health and SPECIAL"),
    rule(b"NPC_", b"DNAM", FieldKind::Struct(NPC_DNAM), "Skills"),
    rule(b"NPC_", b"PNAM", FieldKind::FormId, "Head Part"),
    rule(b"NPC_", b"HNAM", FieldKind::FormId, "Hair"),
    rule(b"NPC_", b"LNAM", FieldKind::F32, "Hair Length"),
    rule(b"NPC_", b"ENAM", FieldKind::FormId, "Eyes"),
    rule(b"NPC_", b"HCLR", FieldKind::Raw, "Hair Color"),
    rule(b"NPC_", b"ZNAM", FieldKind::FormId, "Combat Style"),
    rule(b"NPC_", b"NAM4", FieldKind::U32, "Impact Material Type"),
    rule(b"NPC_", b"FGGS", FieldKind::Raw, "FaceGen Geometry-Symmetric"),
    rule(b"NPC_", b"FGGA", FieldKind::Raw, "FaceGen Geometry-Asymmetric"),
    rule(b"NPC_", b"FGTS", FieldKind::Raw, "FaceGen Texture-Symmetric"),
    rule(b"NPC_", b"NAM5", FieldKind::U16, "Unknown"),
    rule(b"NPC_", b"NAM6", FieldKind::F32, "Height"),
    rule(b"NPC_", b"NAM7", FieldKind::F32, "Weight"),
    rule(b"NPC_", b"ACBS", FieldKind::Struct(ACBS), "Configuration"),
    rule(b"NPC_", b"AIDT", FieldKind::Struct(AIDT), "AI Data"),
    rule(b"NPC_", b"COED", FieldKind::Struct(COED), "Extra Data"),
    // PACK
    rule(b"PACK", b"PKDT", FieldKind::Struct(PKDT), "General"),
    rule(b"PACK", b"PLDT", FieldKind::Struct(PLDT), "Location Subrecord - Location 1"),
    rule(b"PACK", b"PLD2", FieldKind::Struct(PLDT), "Location Subrecord - Location 2"),
    rule(b"PACK", b"PSDT", FieldKind::Struct(PSDT), "Schedule"),
    rule(b"PACK", b"PTDT", FieldKind::Struct(PTDT), "Target 1"),
    rule(b"PACK", b"IDLF", FieldKind::U8, "Idle Animation Flags"),
    rule(b"PACK", b"IDLT", FieldKind::F32, "Idle Timer Setting"),
    rule(b"PACK", b"CNAM", FieldKind::FormId, "Combat Style"),
    rule(b"PACK", b"PKE2", FieldKind::U32, "Escort Distance"),
    rule(b"PACK", b"PKFD", FieldKind::F32, "Follow - Start Location - Trigger Radius"),
    rule(b"PACK", b"PKPT", FieldKind::U16, "Patrol Flags"),
    rule(b"PACK", b"PKDD", FieldKind::Struct(PKDD), "Dialog Data"),
    rule(b"PACK", b"POBA", FieldKind::Marker, "OnBegin Marker / OnEnd Marker / OnChange Marker"),
    rule(b"PACK", b"INAM", FieldKind::FormId, "OnBegin Idle / OnEnd Idle / OnChange Idle"),
    rule(b"PACK", b"TNAM", FieldKind::FormId, "OnBegin Topic / OnEnd Topic / OnChange Topic"),
    rule(b"PACK", b"POEA", FieldKind::Raw, "Unknown"),
    rule(b"PACK", b"POCA", FieldKind::Raw, "Unknown"),
    // PERK
    rule(b"PERK", b"DATA", FieldKind::Struct(PERK_DATA), "Data"),
    rule(b"PERK", b"DATA", FieldKind::Struct(PERK_QUEST_STAGE), "Data"),
    rule(b"PERK", b"DATA", FieldKind::FormId, "Data"),
    rule(b"PERK", b"DATA", FieldKind::Struct(PERK_ENTRY_POINT), "Data"),
    // PGRE
    rule(b"PGRE", b"NAME", FieldKind::FormId, "Base"),
    rule(b"PGRE", b"XEZN", FieldKind::FormId, "Encounter Zone"),
    rule(b"PGRE", b"XPRD", FieldKind::F32, "Idle Time"),
    rule(b"PGRE", b"INAM", FieldKind::FormId, "Idle"),
    rule(b"PGRE", b"TNAM", FieldKind::FormId, "Topic"),
    rule(b"PGRE", b"XOWN", FieldKind::FormId, "Owner"),
    rule(b"PGRE", b"XRNK", FieldKind::I32, "Faction rank"),
    rule(b"PGRE", b"XCNT", FieldKind::I32, "Count"),
    rule(b"PGRE", b"XRDS", FieldKind::F32, "Radius"),
    rule(b"PGRE", b"XHLP", FieldKind::F32, "Health"),
    rule(b"PGRE", b"XLKR", FieldKind::FormId, "Linked Reference"),
    rule(b"PGRE", b"XAPD", FieldKind::U8, "Flags"),
    rule(b"PGRE", b"XATO", ZSTRING, "Activation Prompt"),
    rule(b"PGRE", b"XEMI", FieldKind::FormId, "Emittance"),
    rule(b"PGRE", b"XMBR", FieldKind::FormId, "MultiBound Reference"),
    // PROJ
    rule(b"PROJ", b"NAM1", ZSTRING, "Muzzle Flash Model Filename"),
    rule(b"PROJ", b"VNAM", FieldKind::U32, "Sound Level"),
    // QUST
    rule(b"QUST", b"DATA", FieldKind::Struct(QUST_DATA), "General"),
    rule(b"QUST", b"INDX", FieldKind::I16, "Stage Index"),
    rule(b"QUST", b"CNAM", LSTRING, "Log Entry"),
    rule(b"QUST", b"NNAM", LSTRING, "Objective Text"),
    rule(b"QUST", b"QSDT", FieldKind::U8, "Stage flags"),
    rule(b"QUST", b"QOBJ", FieldKind::I32, "Objective index"),
    rule(b"QUST", b"QSTA", FieldKind::Struct(QSTA), "Quest Target"),
    // RACE
    rule(b"RACE", b"ONAM", FieldKind::FormId, "Older"),
    rule(b"RACE", b"YNAM", FieldKind::FormId, "Younger"),
    rule(b"RACE", b"PNAM", FieldKind::F32, "FaceGen - Main Clamp"),
    rule(b"RACE", b"UNAM", FieldKind::F32, "FaceGen - Face Clamp"),
    // RCPE
    rule(b"RCPE", b"DATA", FieldKind::Struct(RCPE_DATA), "Data"),
    rule(b"RCPE", b"RCIL", FieldKind::FormId, "Item"),
    rule(b"RCPE", b"RCQY", FieldKind::U32, "Quantity"),
    rule(b"RCPE", b"RCOD", FieldKind::FormId, "Unknown"),
    // REFR
    rule(b"REFR", b"NAME", FieldKind::FormId, "Base"),
    rule(b"REFR", b"DATA", FieldKind::Struct(POSITION), "Position/Rotation"),
    rule(b"REFR", b"XRDO", FieldKind::Struct(XRDO), "Radio"),
    rule(b"REFR", b"XOWN", FieldKind::FormId, "Owner"),
    rule(b"REFR", b"XEZN", FieldKind::FormId, "Encounter Zone"),
    rule(b"REFR", b"XRGD", FieldKind::Raw, "Ragdoll Data"),
    rule(b"REFR", b"XRGB", FieldKind::Raw, "Ragdoll Biped Data"),
    rule(b"REFR", b"XPRM", FieldKind::Struct(XPRM), "Primitive"),
    rule(b"REFR", b"XTRI", FieldKind::U32, "Collision Layer"),
    rule(b"REFR", b"XMBO", FieldKind::Struct(TRIPLE_F32), "Bound Half Extents"),
    rule(b"REFR", b"XTEL", FieldKind::Struct(XTEL), "Teleport Destination"),
    rule(b"REFR", b"XMRK", FieldKind::Marker, "Map Marker Marker"),
    rule(b"REFR", b"FNAM", FieldKind::U8, "Map Marker Flags"),
    rule(b"REFR", b"CNAM", FieldKind::FormId, "Audio location (New Vegas only)"),
    rule(b"REFR", b"BNAM", FieldKind::Raw, "BNAM"),
    rule(b"REFR", b"MNAM", FieldKind::F32, "MNAM"),
    rule(b"REFR", b"NNAM", FieldKind::F32, "NNAM"),
    rule(b"REFR", b"TNAM", FieldKind::Struct(MAP_MARKER), "Map Marker Data"),
    rule(b"REFR", b"MMRK", FieldKind::Marker, "Audio marker (New Vegas only)"),
    rule(b"REFR", b"XTRG", FieldKind::FormId, "Target"),
    rule(b"REFR", b"XLCM", FieldKind::I32, "Level Modifier"),
    rule(b"REFR", b"XPRD", FieldKind::F32, "Idle Time"),
    rule(b"REFR", b"INAM", FieldKind::FormId, "Idle"),
    rule(b"REFR", b"XRNK", FieldKind::I32, "Faction Rank"),
    rule(b"REFR", b"XLOC", FieldKind::Struct(XLOC), "Lock Data"),
    rule(b"REFR", b"XCNT", FieldKind::I32, "Count"),
    rule(b"REFR", b"XRDS", FieldKind::F32, "Radius"),
    rule(b"REFR", b"XHLP", FieldKind::F32, "Health"),
    rule(b"REFR", b"XRAD", FieldKind::F32, "Radiation"),
    rule(b"REFR", b"XCHG", FieldKind::F32, "Charge"),
    rule(b"REFR", b"XAMT", FieldKind::FormId, "Ammo Type"),
    rule(b"REFR", b"XAMC", FieldKind::I32, "Ammo Count"),
    rule(b"REFR", b"XLTW", FieldKind::FormId, "Lit Water"),
    rule(b"REFR", b"XLKR", FieldKind::FormId, "Linked Reference"),
    rule(b"REFR", b"XAPD", FieldKind::U8, "Flags"),
    rule(b"REFR", b"XEMI", FieldKind::FormId, "Emittance"),
    rule(b"REFR", b"XMBR", FieldKind::FormId, "MultiBound Reference"),
    rule(b"REFR", b"XACT", FieldKind::U32, "Action Flag"),
    rule(b"REFR", b"XNDP", FieldKind::Struct(XNDP), "Navigation Door Link"),
    rule(b"REFR", b"XSED", FieldKind::U8, "SpeedTree Seed"),
    rule(b"REFR", b"XLRM", FieldKind::FormId, "Linked Room"),
    // SOUN
    rule(b"SOUN", b"FNAM", ZSTRING, "Sound File"),
    rule(b"SOUN", b"RNAM", FieldKind::U8, "Random Chance % (New Vegas only)"),
    rule(b"SOUN", b"SNDD", FieldKind::Struct(SNDD), "Sound Data"),
    rule(b"SOUN", b"SNDD", FieldKind::Struct(SNDD_LONG), "Sound Data"),
    // SPEL
    rule(b"SPEL", b"SPIT", FieldKind::Struct(SPIT), "Effect type, cost etc"),
    rule(b"SPEL", b"EFID", FieldKind::FormId, "Base effect"),
    rule(b"SPEL", b"EFIT", FieldKind::Struct(EFIT), "Effect Data"),
    // TXST
    rule(b"TXST", b"TX00", ZSTRING, "Base Image / Transparency"),
    rule(b"TXST", b"TX01", ZSTRING, "Normal Map / Specular"),
    rule(b"TXST", b"TX02", ZSTRING, "Environment Map Mask"),
    rule(b"TXST", b"TX03", ZSTRING, "Glow Map"),
    rule(b"TXST", b"TX04", ZSTRING, "Parallax Map"),
    rule(b"TXST", b"TX05", ZSTRING, "Enviroment Map"),
    rule(b"TXST", b"DODT", FieldKind::Struct(DODT), "Decal Data"),
    rule(b"TXST", b"DNAM", FieldKind::U16, "Flags"),
    // WEAP
    rule(b"WEAP", b"EITM", FieldKind::FormId, "Object Effect"),
    rule(b"WEAP", b"EAMT", FieldKind::I16, "Enchantment Charge Amount"),
    rule(b"WEAP", b"NAM0", FieldKind::FormId, "Ammo"),
    rule(b"WEAP", b"REPL", FieldKind::FormId, "Repair List"),
    rule(b"WEAP", b"ETYP", FieldKind::I32, "Equipment Type"),
    rule(b"WEAP", b"BIPL", FieldKind::FormId, "Biped Model List"),
    rule(b"WEAP", b"YNAM", FieldKind::FormId, "Sound - Pick Up"),
    rule(b"WEAP", b"ZNAM", FieldKind::FormId, "Sound - Drop"),
    rule(b"WEAP", b"EFSD", FieldKind::FormId, "Scope Effect"),
    rule(b"WEAP", b"MWD1", ZSTRING, "Model With Mod 1 (New Vegas only)"),
    rule(b"WEAP", b"MWD2", ZSTRING, "Model With Mod 2 (New Vegas only)"),
    rule(b"WEAP", b"MWD3", ZSTRING, "Model With Mods 1 and 2 (New Vegas only)"),
    rule(b"WEAP", b"MWD4", ZSTRING, "Model With Mod 3 (New Vegas only)"),
    rule(b"WEAP", b"MWD5", ZSTRING, "Model With Mods 1 and 3 (New Vegas only)"),
    rule(b"WEAP", b"MWD6", ZSTRING, "Model With Mods 2 and 3 (New Vegas only)"),
    rule(b"WEAP", b"MWD7", ZSTRING, "Model With Mods 1, 2 and 3 (New Vegas only)"),
    rule(b"WEAP", b"VANM", ZSTRING, "VATS Attack Name (New Vegas only)"),
    rule(b"WEAP", b"NNAM", ZSTRING, "Embedded Weapon Node"),
    rule(b"WEAP", b"INAM", FieldKind::FormId, "Impact Dataset"),
    rule(b"WEAP", b"WNAM", FieldKind::FormId, "First Person Model"),
    rule(b"WEAP", b"WNM1", FieldKind::FormId, "1st Person Model With Mod 1 (New Vegas only)"),
    rule(b"WEAP", b"WNM2", FieldKind::FormId, "1st Person Model With Mod 2 (New Vegas only)"),
    rule(b"WEAP", b"WNM3", FieldKind::FormId, "1st Person Model With Mods 1 and 2 (New Vegas only)"),
    rule(b"WEAP", b"WNM4", FieldKind::FormId, "1st Person Model With Mod 3 (New Vegas only)"),
    rule(b"WEAP", b"WNM5", FieldKind::FormId, "1st Person Model With Mods 1 and 3 (New Vegas only)"),
    rule(b"WEAP", b"WNM6", FieldKind::FormId, "1st Person Model With Mods 2 and 3 (New Vegas only)"),
    rule(b"WEAP", b"WNM7", FieldKind::FormId, "1st Person Model With Mods 1, 2 and 3 (New Vegas only)"),
    rule(b"WEAP", b"WMI1", FieldKind::FormId, "Weapon Mod 1 (New Vegas only)"),
    rule(b"WEAP", b"WMI2", FieldKind::FormId, "Weapon Mod 2 (New Vegas only)"),
    rule(b"WEAP", b"WMI3", FieldKind::FormId, "Weapon Mod 3 (New Vegas only)"),
    rule(b"WEAP", b"SNAM", FieldKind::FormId, "Sound - Gun - Shoot 3D"),
    rule(b"WEAP", b"XNAM", FieldKind::FormId, "Sound - Gun - Shoot 2D"),
    rule(b"WEAP", b"NAM7", FieldKind::FormId, "Sound - Gun - Shoot 3D Looping"),
    rule(b"WEAP", b"TNAM", FieldKind::FormId, "Sound - Melee - Swing / Gun - No Ammo"),
    rule(b"WEAP", b"NAM6", FieldKind::FormId, "Sound - Block"),
    rule(b"WEAP", b"UNAM", FieldKind::FormId, "Sound - Idle"),
    rule(b"WEAP", b"NAM9", FieldKind::FormId, "Sound - Equip"),
    rule(b"WEAP", b"NAM8", FieldKind::FormId, "Sound - Unequip"),
    rule(b"WEAP", b"DATA", FieldKind::Struct(WEAP_DATA), "Value/Health/Weight/Damage"),
    rule(b"WEAP", b"DNAM", FieldKind::Struct(WEAP_DNAM), "Weapon Data"),
    rule(b"WEAP", b"DNAM", FieldKind::Struct(WEAP_DNAM_NV), "Weapon Data"),
    rule(b"WEAP", b"CRDT", FieldKind::Struct(CRDT), "Critical Data"),
    rule(b"WEAP", b"VATS", FieldKind::Struct(WEAP_VATS), "VATS (New Vegas only)"),
    rule(b"WEAP", b"VNAM", FieldKind::U32, "Sound Level"),
    // WRLD
    rule(b"WRLD", b"XEZN", FieldKind::FormId, "Encounter Zone"),
    rule(b"WRLD", b"WNAM", FieldKind::FormId, "Parent Worldspace"),
    rule(b"WRLD", b"PNAM", FieldKind::Struct(WRLD_PNAM), "Parent Flags"),
    rule(b"WRLD", b"CNAM", FieldKind::FormId, "Climate"),
    rule(b"WRLD", b"NAM2", FieldKind::FormId, "Water"),
    rule(b"WRLD", b"NAM3", FieldKind::FormId, "LOD Water Type"),
    rule(b"WRLD", b"NAM4", FieldKind::F32, "LOD Water Height"),
    rule(b"WRLD", b"DNAM", FieldKind::Struct(PAIR_F32), "Land Data"),
    rule(b"WRLD", b"ONAM", FieldKind::Struct(TRIPLE_F32), "World Map Offset"),
    rule(b"WRLD", b"INAM", FieldKind::FormId, "Image Space"),
    rule(b"WRLD", b"DATA", FieldKind::U8, "Flags"),
    rule(b"WRLD", b"NAM0", FieldKind::Struct(PAIR_F32), "Min Object Bounds"),
    rule(b"WRLD", b"NAM9", FieldKind::Struct(PAIR_F32), "Max Object Bounds"),
    rule(b"WRLD", b"ZNAM", FieldKind::FormId, "Music"),
    rule(b"WRLD", b"NNAM", ZSTRING, "Canopy Shadow"),
    rule(b"WRLD", b"XNAM", ZSTRING, "Water Noise Texture"),
    rule(b"WRLD", b"OFST", FieldKind::Raw, "Offset Data"),
    rule(b"WRLD", b"MNAM", FieldKind::Struct(WRLD_MNAM), "Map Data"),
    // 通用
    common(b"EDID", ZSTRING, "Editor ID"),
    common(b"FULL", LSTRING, "Name"),
    common(b"DESC", LSTRING, "Description"),
    common(b"MODL", ZSTRING, "Model Filename"),
    common(b"MODB", FieldKind::F32, "Bound Radius"),
    common(b"ICON", ZSTRING, "Large Icon"),
    common(b"MICO", ZSTRING, "Small Icon"),
    common(b"SCRI", FieldKind::FormId, "Script"),
    common(b"OBND", FieldKind::Struct(OBND), "Object Bounds"),
    common(b"XSCL", FieldKind::F32, "Scale"),
    common(b"CTDA", FieldKind::Struct(CTDA), "Condition"),
    common(b"SCRO", FieldKind::FormId, "Script Reference"),
    common(b"KSIZ", FieldKind::U32, "Keyword Count"),
    common(b"KWDA", FieldKind::FormIdArray, "Keywords"),
    common(b"SCHR", FieldKind::Struct(SCHR), "Script Header"),
    common(b"SCDA", FieldKind::Raw, "Compiled Script"),
    common(b"SCTX", FieldKind::Raw, "Script Source"),
    common(b"SLSD", FieldKind::Struct(SLSD), "Local Variable"),
    common(b"SCVR", ZSTRING, "Variable Name"),
];

/// 已知记录类型及其名称
pub static KNOWN_RECORDS: &[(Signature, &str)] = &[
    (Signature::new(*b"TES4"), "Plugin Info"),
    (Signature::new(*b"GMST"), "Game Setting"),
    (Signature::new(*b"TXST"), "Texture Set"),
    (Signature::new(*b"MICN"), "Menu Icon"),
    (Signature::new(*b"GLOB"), "Global Variable"),
    (Signature::new(*b"CLAS"), "Class"),
    (Signature::new(*b"FACT"), "Faction"),
    (Signature::new(*b"HDPT"), "Head Part"),
    (Signature::new(*b"HAIR"), "Hair"),
    (Signature::new(*b"EYES"), "Eyes"),
    (Signature::new(*b"RACE"), "Race"),
    (Signature::new(*b"SOUN"), "Sound"),
    (Signature::new(*b"ASPC"), "Acoustic Space"),
    (Signature::new(*b"MGEF"), "Base Effect"),
    (Signature::new(*b"SCPT"), "Script"),
    (Signature::new(*b"LTEX"), "Landscape Texture"),
    (Signature::new(*b"ENCH"), "Object Effect"),
    (Signature::new(*b"SPEL"), "Actor Effect"),
    (Signature::new(*b"ACTI"), "Activator"),
    (Signature::new(*b"TACT"), "Talking Activator"),
    (Signature::new(*b"TERM"), "Terminal"),
    (Signature::new(*b"ARMO"), "Armor"),
    (Signature::new(*b"BOOK"), "Book"),
    (Signature::new(*b"CONT"), "Container"),
    (Signature::new(*b"DOOR"), "Door"),
    (Signature::new(*b"INGR"), "Ingredient"),
    (Signature::new(*b"LIGH"), "Light"),
    (Signature::new(*b"MISC"), "Misc. Item"),
    (Signature::new(*b"STAT"), "Static"),
    (Signature::new(*b"SCOL"), "Static Collection"),
    (Signature::new(*b"MSTT"), "Moveable Static"),
    (Signature::new(*b"PWAT"), "Placeable Water"),
    (Signature::new(*b"GRAS"), "Grass"),
    (Signature::new(*b"TREE"), "Tree"),
    (Signature::new(*b"FURN"), "Furniture"),
    (Signature::new(*b"WEAP"), "Weapon"),
    (Signature::new(*b"AMMO"), "Ammunition"),
    (Signature::new(*b"NPC_"), "Non-Player Character"),
    (Signature::new(*b"CREA"), "Creature"),
    (Signature::new(*b"LVLC"), "Leveled Creature"),
    (Signature::new(*b"LVLN"), "Leveled NPC"),
    (Signature::new(*b"KEYM"), "Key"),
    (Signature::new(*b"ALCH"), "Ingestible"),
    (Signature::new(*b"IDLM"), "Idle Marker"),
    (Signature::new(*b"NOTE"), "Note"),
    (Signature::new(*b"PROJ"), "Projectile"),
    (Signature::new(*b"LVLI"), "Leveled Item"),
    (Signature::new(*b"WTHR"), "Weather"),
    (Signature::new(*b"CLMT"), "Climate"),
    (Signature::new(*b"REGN"), "Region"),
    (Signature::new(*b"NAVI"), "Navigation Mesh Info Map"),
    (Signature::new(*b"CELL"), "Cell"),
    (Signature::new(*b"REFR"), "Placed Object"),
    (Signature::new(*b"ACHR"), "Placed NPC"),
    (Signature::new(*b"ACRE"), "Placed Creature"),
    (Signature::new(*b"PGRE"), "Placed Grenade"),
    (Signature::new(*b"WRLD"), "Worldspace"),
    (Signature::new(*b"LAND"), "Landscape"),
    (Signature::new(*b"NAVM"), "Navigation Mesh"),
    (Signature::new(*b"DIAL"), "Dialog Topic"),
    (Signature::new(*b"INFO"), "Dialog Response"),
    (Signature::new(*b"QUST"), "Quest"),
    (Signature::new(*b"IDLE"), "Idle Animation"),
    (Signature::new(*b"PACK"), "Package"),
    (Signature::new(*b"CSTY"), "Combat Style"),
    (Signature::new(*b"LSCR"), "Load Screen"),
    (Signature::new(*b"ANIO"), "Animated Object"),
    (Signature::new(*b"WATR"), "Water"),
    (Signature::new(*b"EFSH"), "Effect Shader"),
    (Signature::new(*b"EXPL"), "Explosion"),
    (Signature::new(*b"DEBR"), "Debris"),
    (Signature::new(*b"IMGS"), "Image Space"),
    (Signature::new(*b"IMAD"), "Image Space Adapter"),
    (Signature::new(*b"FLST"), "Form List"),
    (Signature::new(*b"PERK"), "Perk"),
    (Signature::new(*b"BPTD"), "Body Part Data"),
    (Signature::new(*b"ADDN"), "Addon Node"),
    (Signature::new(*b"AVIF"), "Actor Value Information"),
    (Signature::new(*b"RADS"), "Radiation Stage"),
    (Signature::new(*b"CAMS"), "Camera Shot"),
    (Signature::new(*b"CPTH"), "Camera Path"),
    (Signature::new(*b"VTYP"), "Voice Type"),
    (Signature::new(*b"IPCT"), "Impact"),
    (Signature::new(*b"IPDS"), "Impact DataSet"),
    (Signature::new(*b"ARMA"), "Armor Addon"),
    (Signature::new(*b"ECZN"), "Encounter Zone"),
    (Signature::new(*b"MESG"), "Message"),
    (Signature::new(*b"RGDL"), "Ragdoll"),
    (Signature::new(*b"DOBJ"), "Default Object Manager"),
    (Signature::new(*b"LGTM"), "Lighting Template"),
    (Signature::new(*b"MUSC"), "Music Type"),
    (Signature::new(*b"IMOD"), "Item Mod"),
    (Signature::new(*b"REPU"), "Reputation"),
    (Signature::new(*b"RCPE"), "Recipe"),
    (Signature::new(*b"RCCT"), "Recipe Category"),
    (Signature::new(*b"CHIP"), "Casino Chip"),
    (Signature::new(*b"CSNO"), "Casino"),
    (Signature::new(*b"LSCT"), "Load Screen Type"),
    (Signature::new(*b"MSET"), "Media Set"),
    (Signature::new(*b"ALOC"), "Media Location Controller"),
    (Signature::new(*b"CHAL"), "Challenge"),
    (Signature::new(*b"AMEF"), "Ammo Effect"),
    (Signature::new(*b"CCRD"), "Caravan Card"),
    (Signature::new(*b"CMNY"), "Caravan Money"),
    (Signature::new(*b"CDCK"), "Caravan Deck"),
    (Signature::new(*b"DEHY"), "Dehydration Stage"),
    (Signature::new(*b"HUNG"), "Hunger Stage"),
    (Signature::new(*b"SLPD"), "Sleep Deprivation Stage"),
    (Signature::new(*b"KYWD"), "Keyword"),
    (Signature::new(*b"LCRT"), "Location Reference Type"),
    (Signature::new(*b"AACT"), "Action"),
    (Signature::new(*b"SCRL"), "Scroll"),
    (Signature::new(*b"SLGM"), "Soul Gem"),
    (Signature::new(*b"SHOU"), "Shout"),
    (Signature::new(*b"WOOP"), "Word Of Power"),
    (Signature::new(*b"OTFT"), "Outfit"),
    (Signature::new(*b"COBJ"), "Constructible Object"),
    (Signature::new(*b"LCTN"), "Location"),
    (Signature::new(*b"SMBN"), "Story Manager Branch Node"),
    (Signature::new(*b"SMQN"), "Story Manager Quest Node"),
    (Signature::new(*b"SMEN"), "Story Manager Event Node"),
    (Signature::new(*b"SNDR"), "Sound Descriptor"),
    (Signature::new(*b"EQUP"), "Equip Type"),
    (Signature::new(*b"MATO"), "Material Object"),
];

/// 查找 (记录, 字段) 的所有规则，专属规则在前
pub fn rules_for(record: Signature, field: Signature) -> impl Iterator<Item = &'static FieldRule> {
    let specific = FIELD_RULES
        .iter()
        .filter(move |r| r.record == Some(record) && r.field == field);
    let general = FIELD_RULES
        .iter()
        .filter(move |r| r.record.is_none() && r.field == field);
    specific.chain(general)
}

/// 按负载长度选择字段布局，无匹配时为 `Raw`
pub fn field_kind(record: Signature, field: Signature, len: usize, ctx: FieldContext) -> FieldKind {
    rules_for(record, field)
        .find(|r| r.kind.accepts(len, ctx))
        .map(|r| r.kind)
        .unwrap_or(FieldKind::Raw)
}

/// 按值的形状选择写入时的字段布局
///
/// 没有规则接受该值时返回第一条规则的布局（随后编码报错），
/// 字段完全没有规则时为 `Raw`。
pub fn kind_for_value(record: Signature, field: Signature, value: &FieldValue, ctx: FieldContext) -> FieldKind {
    rules_for(record, field)
        .find(|r| r.kind == FieldKind::GameSetting || r.kind.admits(value, ctx))
        .or_else(|| rules_for(record, field).next())
        .map(|r| r.kind)
        .unwrap_or(FieldKind::Raw)
}

/// 字段的可读名称
pub fn field_name(record: Signature, field: Signature) -> Option<&'static str> {
    rules_for(record, field).next().map(|r| r.name)
}

pub fn is_known_record(signature: Signature) -> bool {
    KNOWN_RECORDS.iter().any(|(sig, _)| *sig == signature)
}

/// 记录类型的可读名称
pub fn record_name(signature: Signature) -> Option<&'static str> {
    KNOWN_RECORDS
        .iter()
        .find(|(sig, _)| *sig == signature)
        .map(|(_, name)| *name)
}
