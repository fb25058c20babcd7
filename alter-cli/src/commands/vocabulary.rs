use alter_core::constants::vocabulary::{GAUSSDB_DATATYPES, NULLABILITY_OPTIONS};

/// 打印常用数据类型与可空性选项
pub fn show_vocabulary() {
    println!("常用数据类型:");
    for data_type in GAUSSDB_DATATYPES {
        println!("  {data_type}");
    }
    println!();
    println!("可空性选项:");
    for option in NULLABILITY_OPTIONS {
        println!("  {option}");
    }
}
