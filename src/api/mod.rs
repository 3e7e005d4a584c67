//! 后端 API 客户端模块
//!
//! 封装外部摘要/认证服务的全部接口：
//! 注册、登录、Google 授权、离线 PIN 设置与登录、
//! 文件摘要（multipart 上传）、图片分析。

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;
