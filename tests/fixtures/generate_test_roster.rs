// ==========================================
// 测试花名册生成器
// ==========================================
// 用途: 生成手工演练用的花名册 CSV
// 输出: tests/fixtures/datasets/*.csv
// 用法: cargo run --bin generate_test_roster -- [输出目录]
// ==========================================

use csv::Writer;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

// CSV 表头（与默认配置列名一致）
const CSV_HEADER: &[&str] = &["员工 ID", "姓名", "三级部门", "四级部门", "岗位", "入职日期"];

const PROVINCES: &[(&str, &str)] = &[
    ("华东大区", "浙江省区"),
    ("华东大区", "江苏省区"),
    ("华南大区", "广东省区"),
    ("华北大区", "河北省区"),
    ("西南大区", "四川省区"),
];

const SURNAMES: &[&str] = &["张", "王", "李", "赵", "刘", "陈", "杨", "黄"];
const GIVEN: &[&str] = &["伟", "芳", "娜", "敏", "静", "磊", "洋", "勇", "艳", "杰"];

// 员工记录
struct EmployeeRecord {
    employee_id: String,
    name: String,
    level3: String,
    level4: String,
    title: String,
    hired_at: String,
}

impl EmployeeRecord {
    fn new(seq: usize, level3: &str, level4: &str) -> Self {
        Self {
            employee_id: format!("E{:05}", seq),
            name: format!(
                "{}{}",
                SURNAMES[seq % SURNAMES.len()],
                GIVEN[(seq / SURNAMES.len()) % GIVEN.len()]
            ),
            level3: level3.to_string(),
            level4: level4.to_string(),
            title: if seq % 7 == 0 { "主管" } else { "业务员" }.to_string(),
            hired_at: format!("20{:02}-{:02}-01", 10 + seq % 14, 1 + seq % 12),
        }
    }

    fn to_row(&self) -> [&str; 6] {
        [
            &self.employee_id,
            &self.name,
            &self.level3,
            &self.level4,
            &self.title,
            &self.hired_at,
        ]
    }
}

fn write_dataset(dir: &Path, file_name: &str, records: &[EmployeeRecord]) -> Result<(), Box<dyn Error>> {
    let path = dir.join(file_name);
    let mut writer = Writer::from_path(&path)?;
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;
    println!("  ✓ {} ({} 行)", path.display(), records.len());
    Ok(())
}

/// 1. 常规花名册: 每个省区 40 人
fn generate_normal(dir: &Path) -> Result<(), Box<dyn Error>> {
    let records: Vec<EmployeeRecord> = (0..200)
        .map(|i| {
            let (level3, level4) = PROVINCES[i % PROVINCES.len()];
            EmployeeRecord::new(i + 1, level3, level4)
        })
        .collect();
    write_dataset(dir, "roster_normal.csv", &records)
}

/// 2. 含独立省区（四级部门无省区时回退到三级部门）
fn generate_with_independent(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut records: Vec<EmployeeRecord> = (0..30)
        .map(|i| {
            let (level3, level4) = PROVINCES[i % PROVINCES.len()];
            EmployeeRecord::new(i + 1, level3, level4)
        })
        .collect();
    for i in 30..40 {
        records.push(EmployeeRecord::new(i + 1, "海南独立省区", "海口办事处"));
    }
    for i in 40..45 {
        records.push(EmployeeRecord::new(i + 1, "总部", "财务部"));
    }
    write_dataset(dir, "roster_independent.csv", &records)
}

/// 3. 同一员工出现多行
fn generate_duplicate_ids(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut records: Vec<EmployeeRecord> = (0..20)
        .map(|i| EmployeeRecord::new(i + 1, "华东大区", "浙江省区"))
        .collect();
    records.push(EmployeeRecord::new(3, "华东大区", "浙江省区"));
    records.push(EmployeeRecord::new(5, "华东大区", "浙江省区"));
    write_dataset(dir, "roster_duplicate_ids.csv", &records)
}

/// 4. 含员工 ID 为空的行（该行不参与抽签，导出时保留）
fn generate_missing_id(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut records: Vec<EmployeeRecord> = (0..10)
        .map(|i| EmployeeRecord::new(i + 1, "华南大区", "广东省区"))
        .collect();
    records[4].employee_id.clear();
    write_dataset(dir, "roster_missing_id.csv", &records)
}

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/datasets"));
    fs::create_dir_all(&out_dir)?;

    println!("开始生成测试花名册...");

    generate_normal(&out_dir)?;
    generate_with_independent(&out_dir)?;
    generate_duplicate_ids(&out_dir)?;
    generate_missing_id(&out_dir)?;

    println!("✓ 所有测试花名册生成完成！");
    Ok(())
}
