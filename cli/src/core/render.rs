//! # upnpdig Hierarchical Description Renderer
//!
//! File: cli/src/core/render.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Writes device trees and service descriptions as tab-delimited, labeled lines.
//! Each line is `<label>\t<value>`; a downstream tab-stop writer (see `common::ui`)
//! turns the tabs into aligned columns. The sequence and content of the lines is the
//! contract here, not column widths.
//!
//! ## Layout
//!
//! - Device attributes, one line each, in a fixed order, then a blank line.
//! - `Services` section: each service's lines are prefixed with one extra tab.
//! - `Devices:` section: each embedded device is rendered recursively with its
//!   indent grown by [`INDENT_UNIT`] (four spaces per level).
//! - Services and embedded devices appear in document order.
//!
//! Rendering only reads the tree, so rendering the same tree twice yields identical bytes.
//!
use crate::core::description::{DeviceNode, ServiceDescription, StateVariable};
use std::io::{self, Write};

/// Indentation added per level of device nesting.
pub const INDENT_UNIT: &str = "    ";

/// Renders `node` and, recursively, its embedded devices. `indent` prefixes every
/// line of this device.
pub fn render_device<W: Write>(w: &mut W, node: &DeviceNode, indent: &str) -> io::Result<()> {
    let attributes = [
        ("DeviceType", &node.device_type),
        ("FriendlyName", &node.friendly_name),
        ("Manufacturer", &node.manufacturer),
        ("ManufacturerURL", &node.manufacturer_url),
        ("ModelName", &node.model_name),
        ("ModelDescription", &node.model_description),
        ("ModelURL", &node.model_url),
        ("SerialNumber", &node.serial_number),
        ("PresentationURL", &node.presentation_url),
        ("UPC", &node.upc),
        ("UDN", &node.udn),
    ];
    for (label, value) in attributes {
        writeln!(w, "{}{}\t{}", indent, label, value)?;
    }
    writeln!(w)?;

    if !node.services().is_empty() {
        writeln!(w, "{}Services", indent)?;
        for service in node.services() {
            writeln!(w, "\t{}ServiceId\t{}", indent, service.service_id)?;
            writeln!(w, "\t{}ServiceType\t{}", indent, service.service_type)?;
            writeln!(w, "\t{}ControlURL\t{}", indent, service.control_url)?;
            writeln!(w, "\t{}EventSubURL\t{}", indent, service.event_sub_url)?;
            writeln!(w, "\t{}SCPD URL\t{}", indent, service.scpd_url)?;
            writeln!(w)?;
        }
    }

    if !node.embedded_devices().is_empty() {
        writeln!(w, "{}Devices:", indent)?;
        let child_indent = format!("{}{}", indent, INDENT_UNIT);
        for embedded in node.embedded_devices() {
            render_device(w, embedded, &child_indent)?;
            writeln!(w)?;
        }
    }

    Ok(())
}

/// Renders a service description: the state variable table, then the actions.
pub fn render_service<W: Write>(w: &mut W, svc: &ServiceDescription) -> io::Result<()> {
    writeln!(w, "State variables")?;
    for variable in svc.state_variables() {
        render_state_variable(w, variable)?;
    }

    writeln!(w)?;
    writeln!(w, "Actions")?;
    for action in svc.actions() {
        writeln!(w, "Name\t{}", action.name)?;
        writeln!(w, "Arguments:")?;
        for argument in action.arguments() {
            writeln!(w, "\tName\t{}", argument.name)?;
            writeln!(w, "\tDirection\t{}", argument.direction)?;
            writeln!(w, "\tRelatedStateVariable\t{}", argument.related_state_variable)?;
            writeln!(w, "\tRetval\t{}", argument.is_retval())?;
            writeln!(w)?;
        }
        writeln!(w)?;
    }

    Ok(())
}

fn render_state_variable<W: Write>(w: &mut W, variable: &StateVariable) -> io::Result<()> {
    writeln!(w, "Name\t{}", variable.name)?;
    writeln!(w, "Multicast\t{}", variable.multicast)?;
    writeln!(w, "SendEvents\t{}", variable.send_events)?;
    writeln!(w, "DefaultValue\t{}", variable.default_value)?;
    writeln!(w, "DataType\t{}", variable.data_type)?;

    let allowed_values = variable
        .allowed_value_list
        .as_ref()
        .map(|list| list.values.join(" "))
        .unwrap_or_default();
    writeln!(w, "AllowedValueList\t[{}]", allowed_values)?;

    // An absent range renders its empty bounds rather than being skipped.
    let range = variable.allowed_value_range.clone().unwrap_or_default();
    writeln!(
        w,
        "AllowedValueRange\t{}-{}, step {}",
        range.minimum, range.maximum, range.step
    )?;
    writeln!(w)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::description::{
        tests::{NESTED_DEVICE_XML, RENDERING_CONTROL_SCPD},
        DeviceDescription, ServiceRef,
    };

    fn render_device_to_string(node: &DeviceNode) -> String {
        let mut out = Vec::new();
        render_device(&mut out, node, "").expect("write to Vec cannot fail");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn test_render_leaf_device_exact() {
        let node = DeviceNode {
            device_type: "urn:t".into(),
            friendly_name: "Leaf".into(),
            udn: "uuid:1".into(),
            ..Default::default()
        };

        let expected = "DeviceType\turn:t\n\
                        FriendlyName\tLeaf\n\
                        Manufacturer\t\n\
                        ManufacturerURL\t\n\
                        ModelName\t\n\
                        ModelDescription\t\n\
                        ModelURL\t\n\
                        SerialNumber\t\n\
                        PresentationURL\t\n\
                        UPC\t\n\
                        UDN\tuuid:1\n\
                        \n";
        assert_eq!(render_device_to_string(&node), expected);
    }

    #[test]
    fn test_render_services_and_nested_indent() {
        let child = DeviceNode {
            friendly_name: "Child".into(),
            service_list: vec![ServiceRef {
                service_id: "child-svc".into(),
                scpd_url: "/c.xml".into(),
                ..Default::default()
            }]
            .into(),
            ..Default::default()
        };
        let root = DeviceNode {
            friendly_name: "Root".into(),
            service_list: vec![ServiceRef {
                service_id: "root-svc".into(),
                service_type: "urn:st".into(),
                control_url: "/ctl".into(),
                event_sub_url: "/evt".into(),
                scpd_url: "/r.xml".into(),
            }]
            .into(),
            device_list: vec![child].into(),
            ..Default::default()
        };

        let output = render_device_to_string(&root);
        let lines: Vec<&str> = output.lines().collect();

        // Root attributes (11) + blank, then the services section.
        assert_eq!(lines[1], "FriendlyName\tRoot");
        assert_eq!(lines[12], "Services");
        assert_eq!(lines[13], "\tServiceId\troot-svc");
        assert_eq!(lines[14], "\tServiceType\turn:st");
        assert_eq!(lines[15], "\tControlURL\t/ctl");
        assert_eq!(lines[16], "\tEventSubURL\t/evt");
        assert_eq!(lines[17], "\tSCPD URL\t/r.xml");
        assert_eq!(lines[18], "");
        assert_eq!(lines[19], "Devices:");
        // Child device is indented by one unit, its services by a tab then the unit.
        assert_eq!(lines[20], "    DeviceType\t");
        assert_eq!(lines[21], "    FriendlyName\tChild");
        assert_eq!(lines[31], "");
        assert_eq!(lines[32], "    Services");
        assert_eq!(lines[33], "\t    ServiceId\tchild-svc");
        assert_eq!(lines[37], "\t    SCPD URL\t/c.xml");
        assert!(output.ends_with("\t    SCPD URL\t/c.xml\n\n\n"));
    }

    /// The 11 attribute lines of a device with only a friendly name, plus the blank separator.
    fn attribute_block(indent: &str, friendly_name: &str) -> String {
        let mut block = String::new();
        for label in [
            "DeviceType",
            "FriendlyName",
            "Manufacturer",
            "ManufacturerURL",
            "ModelName",
            "ModelDescription",
            "ModelURL",
            "SerialNumber",
            "PresentationURL",
            "UPC",
            "UDN",
        ] {
            let value = if label == "FriendlyName" { friendly_name } else { "" };
            block.push_str(&format!("{}{}\t{}\n", indent, label, value));
        }
        block.push('\n');
        block
    }

    #[test]
    fn test_render_sibling_devices_exact() {
        let named = |name: &str| DeviceNode {
            friendly_name: name.into(),
            ..Default::default()
        };
        let with_service = DeviceNode {
            service_list: vec![ServiceRef {
                service_id: "second-svc".into(),
                scpd_url: "/second.xml".into(),
                ..Default::default()
            }]
            .into(),
            ..named("Second")
        };
        let root = DeviceNode {
            device_list: vec![named("First"), with_service, named("Third")].into(),
            ..named("Root")
        };

        let mut expected = attribute_block("", "Root");
        expected.push_str("Devices:\n");
        expected.push_str(&attribute_block("    ", "First"));
        expected.push('\n');
        expected.push_str(&attribute_block("    ", "Second"));
        expected.push_str(
            "    Services\n\
             \t    ServiceId\tsecond-svc\n\
             \t    ServiceType\t\n\
             \t    ControlURL\t\n\
             \t    EventSubURL\t\n\
             \t    SCPD URL\t/second.xml\n\
             \n",
        );
        expected.push('\n');
        expected.push_str(&attribute_block("    ", "Third"));
        expected.push('\n');

        assert_eq!(render_device_to_string(&root), expected);
    }

    #[test]
    fn test_render_preserves_document_order() {
        let description = DeviceDescription::from_xml(NESTED_DEVICE_XML).unwrap();
        let output = render_device_to_string(&description.device);

        let alarm = output.find("urn:upnp-org:serviceId:AlarmClock").unwrap();
        let system = output.find("urn:upnp-org:serviceId:SystemProperties").unwrap();
        let renderer = output.find("Living Room - Renderer").unwrap();
        let deep = output.find("\n        FriendlyName\tDeep\n").unwrap();
        assert!(alarm < system && system < renderer && renderer < deep);
    }

    #[test]
    fn test_render_device_is_idempotent() {
        let description = DeviceDescription::from_xml(NESTED_DEVICE_XML).unwrap();
        assert_eq!(
            render_device_to_string(&description.device),
            render_device_to_string(&description.device)
        );
    }

    #[test]
    fn test_render_service_exact() {
        let scpd = ServiceDescription::from_xml(RENDERING_CONTROL_SCPD).unwrap();
        let mut out = Vec::new();
        render_service(&mut out, &scpd).unwrap();

        let expected = "State variables\n\
            Name\tVolume\n\
            Multicast\tno\n\
            SendEvents\tno\n\
            DefaultValue\t20\n\
            DataType\tui2\n\
            AllowedValueList\t[]\n\
            AllowedValueRange\t0-100, step 1\n\
            \n\
            Name\tA_ARG_TYPE_Channel\n\
            Multicast\t\n\
            SendEvents\tyes\n\
            DefaultValue\t\n\
            DataType\tstring\n\
            AllowedValueList\t[Master LF RF]\n\
            AllowedValueRange\t-, step \n\
            \n\
            \n\
            Actions\n\
            Name\tGetVolume\n\
            Arguments:\n\
            \tName\tChannel\n\
            \tDirection\tin\n\
            \tRelatedStateVariable\tA_ARG_TYPE_Channel\n\
            \tRetval\tfalse\n\
            \n\
            \tName\tCurrentVolume\n\
            \tDirection\tout\n\
            \tRelatedStateVariable\tVolume\n\
            \tRetval\ttrue\n\
            \n\
            \n\
            Name\tPing\n\
            Arguments:\n\
            \n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_render_argument_direction_as_written() {
        let scpd = ServiceDescription::from_xml(
            r#"<scpd xmlns="urn:schemas-upnp-org:service-1-0">
              <actionList>
                <action>
                  <name>SetMode</name>
                  <argumentList>
                    <argument>
                      <name>NoDirection</name>
                      <relatedStateVariable>A</relatedStateVariable>
                    </argument>
                    <argument>
                      <name>Shouting</name>
                      <direction>OUT</direction>
                      <relatedStateVariable>B</relatedStateVariable>
                    </argument>
                    <argument>
                      <name>Custom</name>
                      <direction>inout</direction>
                      <relatedStateVariable>C</relatedStateVariable>
                    </argument>
                  </argumentList>
                </action>
              </actionList>
            </scpd>"#,
        )
        .unwrap();
        let mut out = Vec::new();
        render_service(&mut out, &scpd).unwrap();

        let output = String::from_utf8(out).unwrap();
        let directions: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("\tDirection\t"))
            .collect();
        assert_eq!(
            directions,
            vec!["\tDirection\t", "\tDirection\tout", "\tDirection\tinout"]
        );
    }

    #[test]
    fn test_render_empty_service() {
        let mut out = Vec::new();
        render_service(&mut out, &ServiceDescription::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "State variables\n\nActions\n");
    }
}
