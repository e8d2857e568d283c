/// Every user command the window can dispatch. Menu items, accelerators and
/// dialog buttons all produce these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    // File
    NewFile,
    OpenFile,
    InsertFile,
    SaveFile,
    SaveFileAs,
    Exit,

    // Edit
    Undo,
    Cut,
    Copy,
    Paste,
    Delete,

    // Search
    Find,
    FindAgain,
    /// Answer from the "Search String:" prompt (`None` = cancelled).
    SubmitSearch(Option<String>),
    Replace,
    ReplaceAgain,
    ReplaceAll,
    CancelReplace,
}
