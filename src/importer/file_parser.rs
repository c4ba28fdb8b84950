// ==========================================
// 智能抽签系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::domain::roster::{datetime_from_excel_serial, Cell, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 取小写扩展名
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// 表头只去掉 BOM，列匹配时再忽略空白
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

/// calamine 单元格 → 带类型的单元格（文本原样保留）
fn excel_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::default(),
        Data::String(s) => Cell::text(s.as_str()),
        Data::Float(f) => Cell::number(*f),
        Data::Int(i) => Cell::number(*i as f64),
        Data::Bool(b) => Cell::boolean(*b),
        Data::DateTime(dt) if !dt.is_duration() => match datetime_from_excel_serial(dt.as_f64()) {
            Some(value) => Cell::datetime(value),
            None => Cell::number(dt.as_f64()),
        },
        other => Cell::text(other.to_string()),
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::EmptySheet(path.display().to_string()));
        }

        let mut table = RawTable::new(headers);
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let cells: Vec<Cell> = record.iter().map(Cell::text).collect();

            // 跳过完全空白的行
            if cells.iter().all(Cell::is_blank) {
                continue;
            }

            // 表头占第 1 行；空行被读取器跳过，优先使用记录的源行号
            let row_number = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(row_idx + 2);
            table.push_cells(row_number, cells);
        }

        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 按扩展名自动选择 xlsx / xls 读取器
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 数据区可能不从 A1 开始
        let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

        let mut rows = range.rows().enumerate();
        let (header_offset, header_row) = rows
            .by_ref()
            .find(|(_, row)| row.iter().any(|cell| !cell.to_string().trim().is_empty()))
            .ok_or_else(|| ImportError::EmptySheet(sheet_name.clone()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| clean_header(&cell.to_string()))
            .collect();

        let mut table = RawTable::new(headers);
        for (offset, data_row) in rows {
            let cells: Vec<Cell> = data_row.iter().map(excel_cell).collect();

            if cells.iter().all(Cell::is_blank) {
                continue;
            }

            table.push_cells(first_row + offset + 1, cells);
        }

        tracing::debug!(
            "Excel 解析完成: sheet={}, header_row={}, rows={}",
            sheet_name,
            first_row + header_offset + 1,
            table.len()
        );

        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();

        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_table(path),
            "xlsx" | "xls" => ExcelParser.parse_to_table(path),
            other => {
                // 不存在的文件优先报告不存在
                ensure_exists(path)?;
                Err(ImportError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}
