#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    if std::path::Path::new("res/tasktracker.ico").exists() {
        res.set_icon("res/tasktracker.ico");
    }
    res.set("FileDescription", "TaskTracker CLI")
        .set("ProductName", "TaskTracker")
        .set("OriginalFilename", "tasktracker.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed version resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
