use dtsdoc::model::EntryKind;
use dtsdoc::{DocsExtractor, ExtractOptions};

const ACCELEROMETER: &str = r#"
declare namespace Taro {
  namespace startAccelerometer {
    type Param = {
      /**
       * 监听加速度数据回调函数的执行频率
       * @default normal
       */
      interval?: keyof typeof interval
      /**
       * 接口调用成功的回调函数
       */
      success?: Function
    }

    enum interval {
      /**
       * 适用于更新游戏的回调频率，在 20ms/次 左右
       */
      'game',
      'ui',
      'normal'
    }
  }
  /**
   * 开始监听加速度数据。
   * @since 1.1.0
   * @supported weapp, h5, rn
   * @example
```javascript
import Taro from '@tarojs/taro'

Taro.startAccelerometer({ interval: 'game' })
```
   * @see https://developers.weixin.qq.com/miniprogram/dev/api/device/accelerometer/wx.startAccelerometer.html
   */
  function startAccelerometer(OBJECT?: startAccelerometer.Param): Promise<any>
}
"#;

#[test]
fn extracts_namespace_fragments_in_source_order() {
    let extractor = DocsExtractor::new(ExtractOptions::default());
    let entries = extractor
        .extract_from_source("types/api/device/accelerometer.d.ts", ACCELEROMETER)
        .expect("extraction should succeed");

    assert_eq!(entries.len(), 1);
    let children = entries[0].children.as_deref().expect("namespace body");
    assert_eq!(children.len(), 2);

    let namespace = &children[0];
    assert_eq!(namespace.name, "startAccelerometer");
    assert_eq!(namespace.kind, EntryKind::Namespace);
    let types = namespace.children.as_deref().unwrap();
    assert_eq!(types[0].name, "Param");
    assert_eq!(types[1].name, "interval");

    let function = &children[1];
    assert_eq!(function.kind, EntryKind::Function);
    assert_eq!(function.documentation.as_deref(), Some("开始监听加速度数据。"));
    assert_eq!(function.parameter_list()[0].name, "OBJECT");
    assert_eq!(
        function.tag("supported").map(|tag| tag.text()),
        Some("weapp, h5, rn")
    );
    assert!(function
        .tag("example")
        .map(|tag| tag.text())
        .unwrap_or_default()
        .starts_with("```javascript\nimport Taro from '@tarojs/taro'\n\nTaro.startAccelerometer"));
}

#[test]
fn type_literal_members_keep_docs_and_defaults() {
    let entries = DocsExtractor::default()
        .extract_from_source("accelerometer.d.ts", ACCELEROMETER)
        .unwrap();
    let namespace = &entries[0].children.as_deref().unwrap()[0];
    let param = &namespace.children.as_deref().unwrap()[0];
    let members = param.members.as_deref().expect("object literal members");

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name, "interval");
    assert_eq!(members[0].type_.as_deref(), Some("keyof typeof interval"));
    assert!(members[0].flags.optional);
    assert_eq!(members[0].tag("default").map(|tag| tag.text()), Some("normal"));
    assert_eq!(
        members[0].documentation.as_deref(),
        Some("监听加速度数据回调函数的执行频率")
    );

    let enumeration = &namespace.children.as_deref().unwrap()[1];
    let values = enumeration.members.as_deref().unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(
        values[0].documentation.as_deref(),
        Some("适用于更新游戏的回调频率，在 20ms/次 左右")
    );
    assert!(values[1].documentation.is_none());
}

#[test]
fn skips_internal_symbols_by_default() {
    let source = r#"
        declare namespace Taro {
          /** @internal */
          function hidden(): void
          function visible(): void
        }
    "#;

    let entries = DocsExtractor::default()
        .extract_from_source("src/lib.d.ts", source)
        .expect("extraction should succeed");

    let names: Vec<_> = entries[0]
        .children
        .as_deref()
        .unwrap()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, ["visible"]);
}

#[test]
fn includes_internal_symbols_when_requested() {
    let source = r#"
        /** @internal */
        export const internalValue: number;
    "#;

    let extractor = DocsExtractor::new(ExtractOptions {
        include_internal: true,
    });
    let entries = extractor
        .extract_from_source("src/lib.d.ts", source)
        .expect("extraction should succeed");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "internalValue");
    assert!(entries[0].flags.exported);
    assert_eq!(entries[0].type_.as_deref(), Some("number"));
}
