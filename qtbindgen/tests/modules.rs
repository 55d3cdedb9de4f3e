//! Module partitioning against a real directory tree.

use std::fs;
use std::path::PathBuf;

use qtbindgen::{partition_modules, Platform, QtConfig};

fn traditional_config(headers: PathBuf, lib_files: &[&str]) -> QtConfig {
    QtConfig {
        headers,
        lib_files: lib_files.iter().map(|f| f.to_string()).collect(),
        target: "x86_64-unknown-linux-gnu".to_string(),
        ..Default::default()
    }
}

#[test]
fn designer_module_registers_every_plugin_header() {
    let root = tempfile::tempdir().unwrap();
    let headers = root.path().join("include");
    fs::create_dir_all(headers.join("QtDesigner")).unwrap();
    let plugin = headers.join("QtUiPlugin");
    fs::create_dir_all(&plugin).unwrap();
    for file in ["customwidget.h", "abstractformbuilder.h", "notes.txt"] {
        fs::write(plugin.join(file), "").unwrap();
    }

    let config = traditional_config(headers.clone(), &["libQtDesigner.so"]);
    let modules = partition_modules(&config, Platform::Unix).unwrap();

    assert_eq!(modules.len(), 1);
    let designer = &modules[0];
    assert_eq!(designer.name, "QtDesigner");
    assert_eq!(designer.library_name, "QtDesignerSharp");
    assert_eq!(
        designer.include_dirs,
        vec![headers.join("QtDesigner"), headers.join("QtUiPlugin")]
    );
    // The full header set of the plugin directory, sorted, after the
    // module-named primary header; the stray text file is not a header.
    assert_eq!(
        designer.headers,
        vec![
            "QtDesigner".to_string(),
            "abstractformbuilder.h".to_string(),
            "customwidget.h".to_string(),
        ]
    );
}

#[test]
fn core_module_carries_the_support_code() {
    let root = tempfile::tempdir().unwrap();
    let headers = root.path().join("include");
    fs::create_dir_all(headers.join("QtCore")).unwrap();

    let mut config = traditional_config(headers, &["libQtCore.so"]);
    config.support_files = PathBuf::from("/opt/qtbindgen/support");
    let modules = partition_modules(&config, Platform::Unix).unwrap();

    let core = &modules[0];
    assert_eq!(
        core.code_files,
        vec![
            PathBuf::from("/opt/qtbindgen/support/QObject.cs"),
            PathBuf::from("/opt/qtbindgen/support/QChar.cs"),
            PathBuf::from("/opt/qtbindgen/support/QEvent.cs"),
            PathBuf::from("/opt/qtbindgen/support/_iobuf.cs"),
        ]
    );
    assert_eq!(core.libraries, vec!["libQtCore.so".to_string()]);
}

#[test]
fn missing_module_include_dir_contributes_nothing() {
    let root = tempfile::tempdir().unwrap();
    let headers = root.path().join("include");
    fs::create_dir_all(&headers).unwrap();

    let config = traditional_config(headers, &["libQtGui.so"]);
    let modules = partition_modules(&config, Platform::Unix).unwrap();

    assert_eq!(modules[0].name, "QtGui");
    assert!(modules[0].include_dirs.is_empty());
    assert!(modules[0].code_files.is_empty());
}

#[test]
fn framework_layout_uses_the_bundle_directories() {
    let config = QtConfig {
        libs: PathBuf::from("/opt/qt/lib"),
        lib_files: vec!["libQtWidgets.dylib".to_string(), "libQtUiPlugin.dylib".to_string()],
        target: "aarch64-apple-darwin".to_string(),
        ..Default::default()
    };
    let modules = partition_modules(&config, Platform::MacOS).unwrap();

    let widgets = &modules[0];
    assert_eq!(
        widgets.include_dirs,
        vec![
            PathBuf::from("/opt/qt/lib/QtWidgets.framework"),
            PathBuf::from("/opt/qt/lib/QtWidgets.framework/Headers"),
        ]
    );

    // The UI-plugin sibling framework coincides with the module's own
    // bundle; the dirs are not duplicated.
    let ui_plugin = &modules[1];
    assert_eq!(
        ui_plugin.include_dirs,
        vec![
            PathBuf::from("/opt/qt/lib/QtUiPlugin.framework"),
            PathBuf::from("/opt/qt/lib/QtUiPlugin.framework/Headers"),
        ]
    );
}

#[test]
fn one_module_per_native_library() {
    let root = tempfile::tempdir().unwrap();
    let config = traditional_config(
        root.path().join("include"),
        &["libQtCore.so", "libQtGui.so", "libQtWidgets.so"],
    );
    let modules = partition_modules(&config, Platform::Unix).unwrap();

    let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["QtCore", "QtGui", "QtWidgets"]);
    for module in &modules {
        assert_eq!(module.libraries.len(), 1);
    }
}
