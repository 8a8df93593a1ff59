//! 输出解析函数
//!
//! 所有解析器都按行容错：无法识别的行直接跳过，不会报错。

use super::types::Package;
use std::collections::HashSet;

/// paru / yay 在查询过宽时给出的提示
const TOO_MANY_MARKERS: [&str; 2] = ["Query arg too small", "Too many package results"];

/// 清理终端输出中的 ANSI 转义序列和特殊字符
pub fn clean_terminal_output(input: &str) -> String {
    let mut result = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    while let Some(&next) = chars.peek() {
                        chars.next();
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            c if c.is_control() && c != '\n' && c != '\t' => {}
            _ => result.push(c),
        }
    }

    result
}

/// 是否为 AUR 助手的"结果过多"提示
pub fn is_too_many_results(text: &str) -> bool {
    TOO_MANY_MARKERS.iter().any(|m| text.contains(m))
}

/// 解析 pacman / paru / yay 的 -Ss 输出
///
/// ```text
/// extra/vim 9.1.0000-1 [installed]
///     Vi Improved, a highly configurable, improved version of the vi text editor
/// ```
pub fn parse_sync_search(output: &str) -> Vec<Package> {
    let mut results = Vec::new();
    let lines: Vec<&str> = output.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if !line.is_empty() && !line.starts_with(' ') && !line.starts_with('\t') {
            let cleaned = clean_terminal_output(line);
            let trimmed = cleaned.trim();

            if let Some((repo, rest)) = trimmed.split_once('/') {
                let parts: Vec<&str> = rest.split_whitespace().collect();

                if let Some(&name) = parts.first() {
                    let version = parts.get(1).unwrap_or(&"").to_string();
                    let installed = rest.contains("[installed") || rest.contains("[Installed");

                    let description = match lines.get(i + 1) {
                        Some(desc_line) if desc_line.starts_with(' ') || desc_line.starts_with('\t') => {
                            i += 1;
                            clean_terminal_output(desc_line.trim())
                        }
                        _ => String::new(),
                    };

                    results.push(Package {
                        source: repo.to_string(),
                        name: name.to_string(),
                        version,
                        description,
                        installed,
                    });
                }
            }
        }
        i += 1;
    }

    results
}

/// 解析 pacman -Si / -Qi 的 "Key : Value" 详情输出
pub fn parse_package_detail(output: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for line in output.lines() {
        if let Some(colon_pos) = line.find(':') {
            let key_part = &line[..colon_pos];
            let value_part = line[colon_pos + 1..].trim();

            if !key_part.starts_with(' ') && !key_part.trim().is_empty() {
                fields.push((key_part.trim().to_string(), value_part.to_string()));
                continue;
            }
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = fields.last_mut() {
                last.1.push(' ');
                last.1.push_str(line.trim());
            }
        }
    }

    fields
}

/// 从 -Si 详情字段构造精确匹配的包（仅取第一个仓库的条目）
pub fn package_from_detail(fields: &[(String, String)]) -> Option<Package> {
    let mut pkg = Package::default();
    for (key, value) in fields {
        let slot = match key.as_str() {
            "Repository" => &mut pkg.source,
            "Name" => &mut pkg.name,
            "Version" => &mut pkg.version,
            "Description" => &mut pkg.description,
            _ => continue,
        };
        // 同名包可能出现在多个仓库，只保留第一段
        if slot.is_empty() {
            *slot = value.clone();
        }
    }
    if pkg.name.is_empty() {
        None
    } else {
        Some(pkg)
    }
}

/// 解析 xbps-query -Rs 输出
///
/// `[*]` 表示已安装，`[-]` 表示未安装。
pub fn parse_xbps_search(output: &str) -> Vec<Package> {
    let mut results = Vec::new();

    for line in output.lines() {
        let (installed, rest) = if let Some(rest) = line.strip_prefix("[*] ") {
            (true, rest)
        } else if let Some(rest) = line.strip_prefix("[-] ") {
            (false, rest)
        } else {
            continue;
        };

        let (name_version, description) = match rest.find("  ") {
            Some(pos) => (&rest[..pos], rest[pos..].trim_start()),
            None => (rest.trim_end(), ""),
        };
        if name_version.is_empty() {
            continue;
        }

        let (name, version) = match name_version.rfind('-') {
            Some(pos) if pos > 0 => (&name_version[..pos], &name_version[pos + 1..]),
            _ => (name_version, ""),
        };

        results.push(Package {
            name: name.to_string(),
            version: version.to_string(),
            description: description.to_string(),
            source: "void".to_string(),
            installed,
        });
    }

    results
}

/// 解析 brew search --desc 输出
pub fn parse_brew_search(output: &str, installed: &HashSet<String>) -> Vec<Package> {
    let mut results = Vec::new();
    let mut source = "formula";

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        if line.contains("==> Formulae") {
            source = "formula";
            continue;
        }
        if line.contains("==> Casks") {
            source = "cask";
            continue;
        }
        if line.starts_with('=') || line.starts_with("No ") {
            continue;
        }

        let (name, description) = match line.split_once(": ") {
            Some((name, desc)) => (name.trim(), desc.trim()),
            None => (line.trim(), ""),
        };
        if name.is_empty() {
            continue;
        }

        results.push(Package {
            name: name.to_string(),
            version: String::new(),
            description: description.to_string(),
            source: source.to_string(),
            installed: installed.contains(name),
        });
    }

    results
}

/// 解析 dnf search 输出：` name.arch   description`
pub fn parse_dnf_search(output: &str, installed: &HashSet<String>) -> Vec<Package> {
    let mut results = Vec::new();

    for line in output.lines() {
        if !line.starts_with(' ') {
            continue;
        }
        if line.contains("Matched fields:") || line.contains("Updating") || line.contains("Repositories") {
            continue;
        }

        let line = line.trim_start();
        let Some(dot) = line.find('.') else { continue };
        let Some(arch_len) = line[dot..].find([' ', '\t']) else {
            continue;
        };
        let name_arch = &line[..dot + arch_len];
        let description = line[dot + arch_len..]
            .trim_start()
            .trim_start_matches(':')
            .trim_start();

        let name = match name_arch.rfind('.') {
            Some(pos) => &name_arch[..pos],
            None => name_arch,
        };

        results.push(Package {
            name: name.to_string(),
            version: String::new(),
            description: description.to_string(),
            source: "fedora".to_string(),
            installed: installed.contains(name),
        });
    }

    results
}

/// 解析 apk search -v 输出：`name-1.2.3-r0 - description`
pub fn parse_apk_search(output: &str, installed: &HashSet<String>) -> Vec<Package> {
    let mut results = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name_version, description) = match line.split_once(" - ") {
            Some((nv, desc)) => (nv.trim(), desc.trim()),
            None => (line, ""),
        };

        let (name, version) = split_apk_name_version(name_version);
        if name.is_empty() {
            continue;
        }

        results.push(Package {
            name: name.to_string(),
            version: version.to_string(),
            description: description.to_string(),
            source: "main".to_string(),
            installed: installed.contains(name),
        });
    }

    results
}

/// `busybox-1.36.1-r5` → (`busybox`, `1.36.1-r5`)
fn split_apk_name_version(name_version: &str) -> (&str, &str) {
    let mut parts = name_version.rsplitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(rel), Some(_), Some(name)) if rel.starts_with('r') && !name.is_empty() => {
            (name, &name_version[name.len() + 1..])
        }
        _ => match name_version.rsplit_once('-') {
            Some((name, version)) if !name.is_empty() => (name, version),
            _ => (name_version, ""),
        },
    }
}

/// 解析 apt-cache search 输出：`name - description`
pub fn parse_apt_search(output: &str, installed: &HashSet<String>) -> Vec<Package> {
    output
        .lines()
        .filter_map(|line| line.split_once(" - "))
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, desc)| {
            let name = name.trim();
            Package {
                name: name.to_string(),
                version: String::new(),
                description: desc.trim().to_string(),
                source: "apt".to_string(),
                installed: installed.contains(name),
            }
        })
        .collect()
}

/// 每行一个包名的列表（dpkg-query / rpm -qa / brew list / apk info）
pub fn parse_name_list(output: &str) -> HashSet<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// 按相关度排序：完全匹配 > 前缀匹配 > 包含 > 其他，同级按名字长度
pub fn sort_by_relevance(packages: &mut [Package], query: &str) {
    let query = query.to_lowercase();
    packages.sort_by_cached_key(|pkg| {
        let name = pkg.name.to_lowercase();
        let rank = if name == query {
            0
        } else if name.starts_with(&query) {
            1
        } else if name.contains(&query) {
            2
        } else {
            3
        };
        (rank, name.len())
    });
}
