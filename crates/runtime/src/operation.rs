//! Operation descriptors shared by every request of one operation

/// Static description of one remote operation
///
/// Generated code builds one of these per operation on first use and keeps
/// it in a `OnceLock` for the rest of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    /// Wire-level operation name
    pub name: &'static str,
    /// HTTP verb; empty lets the transport pick
    pub http_method: &'static str,
    /// Path template; empty when the operation has none
    pub http_path: &'static str,
    pub paginator: Option<Paginator>,
}

/// Field names that drive page-to-page iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paginator {
    /// Request field that receives the next-page token
    pub input_token: &'static str,
    /// Response field holding the next-page token
    pub output_token: &'static str,
    /// Request field bounding the page size
    pub limit_token: &'static str,
    /// Response field telling whether more pages exist
    pub truncation_token: &'static str,
}
