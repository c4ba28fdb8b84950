// ==========================================
// 智能抽签系统 - 表格写出
// ==========================================
// 支持: Excel (.xlsx, 按源类型写回数字/布尔/日期) / CSV (.csv, UTF-8 BOM)
// 每次写出均为整文件重写
// ==========================================

use crate::domain::roster::{excel_serial_from_datetime, CellValue, RawTable};
use crate::exporter::error::{ExportError, ExportResult};
use crate::importer::file_parser::extension_of;
use csv::WriterBuilder;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::Write;
use std::path::Path;

// ==========================================
// FileWriter Trait
// ==========================================
// 实现者: CsvWriter, XlsxWriter
pub trait FileWriter: Send + Sync {
    /// 将表格整表写出到文件（覆盖）
    fn write_table(&self, table: &RawTable, file_path: &Path) -> ExportResult<()>;
}

fn ensure_parent_dir(path: &Path) -> ExportResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(
            ExportError::DirectoryNotFound(parent.display().to_string()),
        ),
        _ => Ok(()),
    }
}

// ==========================================
// CSV Writer 实现
// ==========================================
pub struct CsvWriter;

impl FileWriter for CsvWriter {
    fn write_table(&self, table: &RawTable, file_path: &Path) -> ExportResult<()> {
        ensure_parent_dir(file_path)?;

        let mut file = File::create(file_path)?;
        // 写入 BOM，Excel 打开时中文表头不乱码
        file.write_all("\u{feff}".as_bytes())?;

        let mut writer = WriterBuilder::new().from_writer(file);
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row.cells.iter().map(|c| c.text.as_str()))?;
        }
        writer.flush()?;

        Ok(())
    }
}

// ==========================================
// Excel Writer 实现
// ==========================================
pub struct XlsxWriter;

impl FileWriter for XlsxWriter {
    fn write_table(&self, table: &RawTable, file_path: &Path) -> ExportResult<()> {
        ensure_parent_dir(file_path)?;

        if table.headers.len() > u16::MAX as usize {
            return Err(ExportError::Xlsx(format!(
                "列数过多: {}",
                table.headers.len()
            )));
        }

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let worksheet = workbook.add_worksheet();

        for (col_idx, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col_idx as u16, header, &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let excel_row = u32::try_from(row_idx + 1)
                .map_err(|_| ExportError::Xlsx(format!("行数过多: {}", table.len())))?;
            for (col_idx, cell) in row.cells.iter().enumerate() {
                let col = col_idx as u16;
                match &cell.value {
                    CellValue::Text if cell.text.is_empty() => {}
                    CellValue::Text => {
                        worksheet.write_string(excel_row, col, cell.text.as_str())?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(excel_row, col, *n)?;
                    }
                    CellValue::Boolean(b) => {
                        worksheet.write_boolean(excel_row, col, *b)?;
                    }
                    // 日期以序列号 + 日期格式写出，与 Excel 自身存储一致
                    CellValue::DateTime(dt) => {
                        let format = if dt.time() == chrono::NaiveTime::MIN {
                            &date_format
                        } else {
                            &datetime_format
                        };
                        worksheet.write_number_with_format(
                            excel_row,
                            col,
                            excel_serial_from_datetime(dt),
                            format,
                        )?;
                    }
                }
            }
        }

        workbook.save(file_path)?;
        Ok(())
    }
}

// ==========================================
// 通用写出器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileWriter;

impl UniversalFileWriter {
    pub fn write<P: AsRef<Path>>(&self, table: &RawTable, file_path: P) -> ExportResult<()> {
        let path = file_path.as_ref();

        match extension_of(path).as_str() {
            "csv" => CsvWriter.write_table(table, path),
            "xlsx" => XlsxWriter.write_table(table, path),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }

    /// 给定源文件扩展名，返回可写出的扩展名（xls 只能读不能写，改为 xlsx）
    pub fn output_extension_for(source: &Path) -> &'static str {
        match extension_of(source).as_str() {
            "csv" => "csv",
            _ => "xlsx",
        }
    }
}
