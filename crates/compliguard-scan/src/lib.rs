//! Parse nmap-style scan text into one [`HostScan`] per host.
//!
//! IO-free and total: any input yields a (possibly empty) host list.
//!
//! Recognized lines (after trimming and dropping NUL bytes):
//! - `Nmap scan report for <host>`: starts a host. The address is the last token, with
//!   surrounding parentheses removed (`name (10.0.0.1)` -> `10.0.0.1`).
//! - `<port>/tcp  open ...`: an open port, kept verbatim.
//! - `Host script results:` opens a block whose `|_` lines are findings.
//! - any other line containing `CVE-`: a finding, kept verbatim.
//!
//! Hosts reported more than once are merged. Ports and findings are deduplicated, first seen
//! order preserved.

#![forbid(unsafe_code)]

use compliguard_types::HostScan;

const HOST_MARKER: &str = "Nmap scan report for";
const SCRIPT_MARKER: &str = "Host script results";
const HOST_STATUS_UP: &str = "up";

#[derive(Default)]
struct Pending {
    ip: Option<String>,
    ports: Vec<String>,
    vulns: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

impl Pending {
    fn flush(&mut self, hosts: &mut Vec<HostScan>) {
        let ports = std::mem::take(&mut self.ports);
        let vulns = std::mem::take(&mut self.vulns);
        let Some(ip) = self.ip.take() else {
            return;
        };

        let host = match hosts.iter_mut().position(|h| h.ip == ip) {
            Some(i) => &mut hosts[i],
            None => {
                hosts.push(HostScan {
                    ip,
                    status: HOST_STATUS_UP.to_string(),
                    open_ports: Vec::new(),
                    vulnerabilities: Vec::new(),
                });
                let last = hosts.len() - 1;
                &mut hosts[last]
            }
        };
        for port in ports {
            push_unique(&mut host.open_ports, port);
        }
        for vuln in vulns {
            push_unique(&mut host.vulnerabilities, vuln);
        }
    }
}

fn host_address(line: &str) -> Option<String> {
    let last = line.split_whitespace().last()?;
    let addr = last.trim_start_matches('(').trim_end_matches(')');
    if addr.is_empty() || line.trim_end() == HOST_MARKER {
        None
    } else {
        Some(addr.to_string())
    }
}

/// `/tcp`, then at least one whitespace character, then `open`.
fn is_open_tcp_port(line: &str) -> bool {
    line.match_indices("/tcp").any(|(i, m)| {
        let rest = &line[i + m.len()..];
        let trimmed = rest.trim_start();
        trimmed.len() < rest.len() && trimmed.starts_with("open")
    })
}

pub fn parse_scan_report(text: &str) -> Vec<HostScan> {
    let mut hosts = Vec::new();
    let mut pending = Pending::default();
    let mut in_script_block = false;

    for raw in text.lines() {
        let cleaned = raw.replace('\0', "");
        let line = cleaned.trim();

        if line.starts_with(HOST_MARKER) {
            pending.flush(&mut hosts);
            pending.ip = host_address(line);
            in_script_block = false;
            continue;
        }

        if is_open_tcp_port(line) {
            if pending.ip.is_some() {
                push_unique(&mut pending.ports, line.to_string());
            }
            continue;
        }

        if line.starts_with(SCRIPT_MARKER) {
            in_script_block = true;
            continue;
        }

        if in_script_block {
            if let Some(finding) = line.strip_prefix("|_") {
                if pending.ip.is_some() {
                    push_unique(&mut pending.vulns, finding.trim().to_string());
                }
                continue;
            }
            in_script_block = false;
        }

        if line.contains("CVE-") && pending.ip.is_some() {
            push_unique(&mut pending.vulns, line.to_string());
        }
    }

    pending.flush(&mut hosts);
    hosts
}
