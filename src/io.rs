/// IO 抽象层模块
///
/// 文件读写的抽象接口，解析和序列化本身只处理内存中的字节。
///
/// - **traits**: 定义 Reader/Writer trait 接口
/// - **esp_io**: 基于 std::fs 和内存映射的默认实现
pub mod traits;
pub mod esp_io;

pub use traits::{EspReader, EspWriter, RawEspData};
pub use esp_io::{DefaultEspReader, DefaultEspWriter, MmapEspReader};
