//! 文件来源抽象
//!
//! 校验器只需要文件名、字节长度和前几个字节；摘要上传需要完整内容。
//! 用一个异步 trait 把这两种读取都抽出来，磁盘文件和内存文件
//! （测试固件）走同一套校验逻辑。

mod source;

pub use source::{DiskFile, FileSource, MemoryFile};
