#![cfg(feature = "json")]

use dtsdoc::{merge, render_json, DocsExtractor};
use serde_json::Value;

#[test]
fn renders_merged_tree_with_metadata() {
    let source = r#"
        declare namespace Taro {
          namespace vibrateLong {
            type Param = { success?: Function }
          }
          /** 使手机发生较长时间的振动（400 ms) */
          function vibrateLong(OBJECT?: vibrateLong.Param): Promise<any>
        }
    "#;

    let entries = DocsExtractor::default()
        .extract_from_source("vibrate.d.ts", source)
        .unwrap();
    let json = render_json(&merge(entries)).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert!(value["generatedAt"].is_string());

    let root = &value["entries"][0];
    assert_eq!(root["name"], "Taro");
    assert!(root.get("children").is_none());

    let export = &root["exports"][0];
    assert_eq!(export["name"], "vibrateLong");
    assert_eq!(export["kind"], "function");
    assert_eq!(export["documentation"], "使手机发生较长时间的振动（400 ms)");
    assert_eq!(export["parameters"][0]["name"], "OBJECT");
    assert_eq!(export["exports"][0]["name"], "Param");
    assert_eq!(export["exports"][0]["members"][0]["type"], "Function");
}
