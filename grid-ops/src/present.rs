use itertools::Itertools;

use grid_core::info::MemberInfo;

use crate::registry::MemberSet;
use crate::report::{ReportSection, SectionedReport, TabularReport};

/// Member table with one row per member in set order. Callers branch on an
/// empty set before rendering; an empty membership is reported as an
/// informational outcome, never as an empty table.
pub fn member_table(members: &MemberSet) -> TabularReport {
    let mut table = TabularReport::new(["Name", "Id"]);
    for member in members.iter() {
        table.push_row([member.name.as_str(), member.id.as_str()]);
    }
    table
}

/// Detail report for one member. The primary section carries the identity
/// and runtime fields in fixed order; the off-heap field only appears when
/// the member reported a non-empty descriptor. Server members get a second
/// section listing every cache server endpoint plus the client connection
/// count.
pub fn member_report(info: &MemberInfo) -> SectionedReport {
    let mut report = SectionedReport::new();
    let mut section = ReportSection::new();
    section.field("Name", info.name.as_str());
    section.field("Id", info.id.as_str());
    section.field("Host", info.host.as_str());
    section.field("Regions", info.hosted_regions.iter().join("\n"));
    section.field("PID", info.process_id.to_string());
    section.field("Groups", info.groups.iter().join(","));
    section.field("Used Heap", format!("{}M", info.heap_used_mb));
    section.field("Max Heap", format!("{}M", info.heap_max_mb));
    if let Some(off_heap) = info.off_heap_size.as_deref() {
        if !off_heap.is_empty() {
            section.field("Off Heap Size", off_heap);
        }
    }
    section.field("Working Dir", info.working_dir.as_str());
    section.field("Log file", info.log_file.as_str());
    section.field("Locators", info.locators.as_str());
    report.push_section(section);
    if info.is_server {
        let mut servers = ReportSection::with_header("Cache Server Information");
        for server in &info.cache_servers {
            servers.field("Server Bind", server.bind_address.as_str());
            servers.field("Server Port", server.port.to_string());
            servers.field("Running", server.running.to_string());
        }
        servers.field("Client Connections", info.client_connections.to_string());
        report.push_section(servers);
    }
    report
}
