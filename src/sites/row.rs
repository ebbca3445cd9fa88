/// One result row as read from a site's markup, before any numeric parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub name: String,
    pub media_type: String,
    pub category: String,

    /// Seeder count as printed on the page
    pub seeders: String,

    /// Leecher count as printed on the page
    pub leechers: String,

    pub magnet_link: Option<String>,

    /// Free text holding the size (e.g. "Size 706.02 MiB")
    pub file_size: String,

    pub vip_status: bool,
    pub trusted: bool,

    /// Relative path of the detail page
    pub href: Option<String>,

    pub uploader: Option<String>,
    pub comment_count: u32,
}
