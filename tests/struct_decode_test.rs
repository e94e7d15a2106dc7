//! End-to-end struct decoding against a real getter return payload

use abidec::{DecodedValue, Error, StructDecoder};
use alloy_primitives::{address, Address, U256};
use serde::Deserialize;
use serde_json::json;

const TASK_DEF: &str = "
    struct Task {
        string title;
        string description;
        address reporter;
        address assignee
        uint256[2] deadline;
    }
";

const TASK_PAYLOAD: &str = concat!(
    "0000000000000000000000000000000000000000000000000000000000000020",
    "00000000000000000000000000000000000000000000000000000000000000c0",
    "0000000000000000000000000000000000000000000000000000000000000100",
    "000000000000000000000000acdad15d8f07d8df258fe11332b752785d6b1d22",
    "0000000000000000000000008b1383709d1e80a291de5d67993252dfc52c3700",
    "00000000000000000000000000000000000000000000000000000000672f269b",
    "00000000000000000000000000000000000000000000000000000000672f34ab",
    "0000000000000000000000000000000000000000000000000000000000000006",
    "526f636b65740000000000000000000000000000000000000000000000000000",
    "0000000000000000000000000000000000000000000000000000000000000019",
    "43726561746520526f636b657420546f20546865204d6f6f6e00000000000000",
);

fn payload() -> Vec<u8> {
    hex::decode(TASK_PAYLOAD).expect("valid hex")
}

#[test]
fn test_decode_task_map() {
    let decoder = StructDecoder::from_struct_def(TASK_DEF).unwrap();
    let decoded = decoder.decode(&payload()).unwrap();

    assert_eq!(decoded.len(), 1);
    let task = decoded["Task"].as_struct().expect("Task nested by struct name");
    assert_eq!(task.len(), 5);
    assert_eq!(task["title"].as_str(), Some("Rocket"));
    assert_eq!(task["description"].as_str(), Some("Create Rocket To The Moon"));
    assert_eq!(
        task["reporter"].as_address(),
        Some(address!("acdad15d8f07d8df258fe11332b752785d6b1d22"))
    );
    let deadline = task["deadline"].as_array().expect("fixed array");
    assert_eq!(
        deadline,
        [
            DecodedValue::Uint(U256::from(1731143323u64)),
            DecodedValue::Uint(U256::from(1731146923u64)),
        ]
    );
}

#[test]
fn test_decode_task_json() {
    let decoder = StructDecoder::from_struct_def(TASK_DEF).unwrap();
    let decoded = decoder.decode(&payload()).unwrap();

    let expected = json!({
        "Task": {
            "title": "Rocket",
            "description": "Create Rocket To The Moon",
            "reporter": "0xaCDaD15d8F07D8Df258fe11332b752785d6b1d22",
            "assignee": "0x8B1383709D1e80A291DE5d67993252dFC52C3700",
            "deadline": [1731143323u64, 1731146923u64]
        }
    });
    assert_eq!(serde_json::to_value(&decoded).unwrap(), expected);
}

#[test]
fn test_decode_is_idempotent() {
    let decoder = StructDecoder::from_struct_def(TASK_DEF).unwrap();
    let data = payload();
    assert_eq!(decoder.decode(&data).unwrap(), decoder.decode(&data).unwrap());
}

#[test]
fn test_decode_struct_into_typed_target() {
    #[derive(Debug, Deserialize)]
    struct Task {
        title: String,
        description: String,
        reporter: Address,
        assignee: Address,
        deadline: [U256; 2],
    }

    let decoder = StructDecoder::builder().with_struct(TASK_DEF).build().unwrap();
    let task: Task = decoder.decode_struct(&payload()).unwrap();

    assert_eq!(task.title, "Rocket");
    assert_eq!(task.description, "Create Rocket To The Moon");
    assert_eq!(task.reporter, address!("acdad15d8f07d8df258fe11332b752785d6b1d22"));
    assert_eq!(task.assignee, address!("8b1383709d1e80a291de5d67993252dfc52c3700"));
    assert_eq!(
        task.deadline,
        [U256::from(1731143323u64), U256::from(1731146923u64)]
    );
}

#[test]
fn test_decode_struct_small_ints_into_u64() {
    #[derive(Debug, Deserialize)]
    struct Deadline {
        deadline: Vec<u64>,
    }

    let decoder = StructDecoder::from_struct_def(TASK_DEF).unwrap();
    let task: Deadline = decoder.decode_struct(&payload()).unwrap();
    assert_eq!(task.deadline, vec![1731143323, 1731146923]);
}

#[test]
fn test_modifier_keyword_keeps_field_positions() {
    let decoder = StructDecoder::from_struct_def(
        "struct Vault {\n    address payable owner;\n    uint256 amount;\n}",
    )
    .unwrap();
    assert_eq!(decoder.schema().unwrap().fields.len(), 2);

    let mut data = vec![0u8; 12];
    data.extend_from_slice(&[0x11; 20]);
    data.extend_from_slice(&U256::from(5u64).to_be_bytes::<32>());

    let decoded = decoder.decode(&data).unwrap();
    let vault = decoded["Vault"].as_struct().unwrap();
    assert_eq!(vault["owner"].as_address(), Some(Address::repeat_byte(0x11)));
    assert_eq!(vault["amount"].as_uint(), Some(U256::from(5u64)));
}

#[test]
fn test_decode_struct_projection_error() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Wrong {
        title: u64,
    }

    let decoder = StructDecoder::from_struct_def(TASK_DEF).unwrap();
    assert!(matches!(
        decoder.decode_struct::<Wrong>(&payload()),
        Err(Error::Projection(_))
    ));
}

#[test]
fn test_truncated_payload_is_codec_error() {
    let decoder = StructDecoder::from_struct_def(TASK_DEF).unwrap();
    let data = payload();
    assert!(matches!(
        decoder.decode(&data[..64]),
        Err(Error::Codec { .. })
    ));
}

#[test]
fn test_descriptor_mirrors_schema() {
    let decoder = StructDecoder::from_struct_def(TASK_DEF).unwrap();
    let schema = decoder.schema().unwrap();
    let descriptor = decoder.descriptor().unwrap();

    assert_eq!(descriptor["name"], "getTask");
    assert_eq!(descriptor["outputs"][0]["internalType"], "struct Task");
    let components = descriptor["outputs"][0]["components"].as_array().unwrap();
    assert_eq!(components.len(), schema.fields.len());
    for (component, field) in components.iter().zip(&schema.fields) {
        assert_eq!(component["name"], field.name.as_str());
        assert_eq!(component["type"], field.kind.as_str());
    }
}
