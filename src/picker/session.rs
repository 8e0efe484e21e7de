//! 选择器会话控制器
//!
//! 编排快照、过滤、选择与上传，向宿主表单暴露 commit/cancel 契约。
//! 两种变体：单选 [`MediaPicker`] 与多选 [`MultiMediaPicker`]。
//!
//! 打开分三步（`begin_open` / `fetch` / `complete_open`），
//! 以便宿主在抓取挂起期间关闭会话时丢弃迟到的结果；
//! `open` 是顺序执行三步的便捷方法。

use chrono::Utc;

use crate::api::{AuthContext, MediaBackend};
use crate::models::{Artist, ArtistQuery, Media, MediaPatch, MediaQuery, UploadRequest};
use crate::utils::error::{AppError, AppResult};

use super::catalog::Catalog;
use super::filter::{visible, DateFilter, FilterState, MediaSort};
use super::selection::{
    MultiCommit, MultiSelection, SelectOutcome, SingleCommit, SingleSelection, ToggleResult,
};

/// 会话配置
#[derive(Debug, Clone)]
pub struct PickerOptions {
    /// 一次列表抓取的页大小（取“足够大即全部”的值）
    pub per_page: u32,
    /// 宿主上下文的默认艺术家（同时作为过滤初值与上传目标初值，
    /// 例如从“编辑某艺术家的媒体”进入时）
    pub default_artist_id: Option<String>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            per_page: 500,
            default_artist_id: None,
        }
    }
}

/// 网格展示状态
///
/// 区分“快照为空”与“快照非空但过滤结果为空”两种空态，
/// 两者对应不同的界面文案。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    /// 初始抓取进行中
    Loading,
    /// 媒体库为空
    EmptyCatalog,
    /// 当前过滤条件下无结果
    EmptyFiltered,
    /// 有可见条目
    Populated,
}

/// 一次打开所需的全部数据
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub media: Vec<Media>,
    pub artists: Vec<Artist>,
    pub folders: Vec<String>,
}

/// 单个文件的上传失败
#[derive(Debug)]
pub struct UploadFailure {
    pub filename: String,
    pub error: AppError,
}

/// 上传批次结果
///
/// 批内每个文件独立成败：失败的文件记录在 `failures` 中，
/// 不中断其余文件，也不回滚已成功的文件。
#[derive(Debug, Default)]
pub struct UploadBatchResult {
    /// 成功上传的媒体 ID（按完成顺序）
    pub uploaded: Vec<String>,
    pub failures: Vec<UploadFailure>,
}

impl UploadBatchResult {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 两种选择器共用的会话状态
#[derive(Debug, Default)]
struct SessionState {
    open: bool,
    loading: bool,
    uploading: bool,
    catalog: Catalog,
    artists: Vec<Artist>,
    folders: Vec<String>,
    filters: FilterState,
    sort: MediaSort,
    /// 上传目标艺术家
    upload_artist_id: Option<String>,
    /// 本次会话内上传的媒体 ID（按上传顺序）
    session_uploads: Vec<String>,
}

impl SessionState {
    /// 重置为一次新会话的初始状态
    fn reset(&mut self, options: &PickerOptions) {
        self.open = true;
        self.loading = true;
        self.uploading = false;
        self.catalog = Catalog::new();
        self.artists.clear();
        self.folders.clear();
        self.filters = FilterState {
            date: DateFilter::All,
            artist_id: options.default_artist_id.clone(),
        };
        self.sort = MediaSort::default();
        self.upload_artist_id = options.default_artist_id.clone();
        self.session_uploads.clear();
    }

    /// 安装抓取结果；会话已关闭时丢弃
    fn install(&mut self, result: AppResult<CatalogSnapshot>) -> AppResult<()> {
        if !self.open {
            tracing::debug!("会话已关闭，忽略迟到的抓取结果");
            return Ok(());
        }
        self.loading = false;
        match result {
            Ok(snapshot) => {
                tracing::debug!(media = snapshot.media.len(), "媒体快照已安装");
                self.catalog.replace(snapshot.media);
                self.artists = snapshot.artists;
                self.folders = snapshot.folders;
                Ok(())
            }
            Err(err) => {
                // 不提供重试入口：快照保持为空，会话仅可取消
                tracing::error!(error = %err, "媒体快照抓取失败");
                Err(err)
            }
        }
    }

    fn visible(&self) -> Vec<&Media> {
        visible(self.catalog.items(), &self.filters, self.sort, Utc::now())
    }

    fn grid_state(&self) -> GridState {
        if self.loading {
            GridState::Loading
        } else if self.catalog.is_empty() {
            GridState::EmptyCatalog
        } else if self.visible().is_empty() {
            GridState::EmptyFiltered
        } else {
            GridState::Populated
        }
    }

    /// 上传成功后的快照维护（前插 + 记入会话上传）
    fn record_upload(&mut self, media: &Media) {
        self.catalog.prepend(media.clone());
        if !self.session_uploads.contains(&media.id) {
            self.session_uploads.push(media.id.clone());
        }
    }

    /// 批次收尾：设置了上传目标艺术家时，切过滤让新上传立即可见
    fn finish_upload_batch(&mut self) {
        self.uploading = false;
        if self.upload_artist_id.is_some() {
            self.filters.artist_id = self.upload_artist_id.clone();
        }
    }

    /// 上传前的守卫；不可上传时返回 false 并告警
    fn may_upload(&self) -> bool {
        if !self.open {
            tracing::warn!("会话未打开，忽略上传请求");
            return false;
        }
        if self.uploading {
            tracing::warn!("上一批上传尚未完成，忽略重复触发");
            return false;
        }
        true
    }

    /// 给请求补上上传目标艺术家（请求已自带时不覆盖）
    fn tag_upload(&self, mut request: UploadRequest) -> UploadRequest {
        if request.artist_id.is_none() {
            request.artist_id = self.upload_artist_id.clone();
        }
        request
    }
}

/// 抓取一次打开所需的数据（顺序发起三个请求）
async fn fetch_snapshot<B: MediaBackend>(
    backend: &B,
    auth: &AuthContext,
    options: &PickerOptions,
) -> AppResult<CatalogSnapshot> {
    let media = backend
        .list_media(auth, &MediaQuery::page(1, options.per_page))
        .await?;
    let artists = backend
        .list_artists(
            auth,
            &ArtistQuery {
                search: None,
                page: 1,
                per_page: 100,
            },
        )
        .await?;
    let folders = backend.list_media_folders(auth).await?;
    Ok(CatalogSnapshot {
        media,
        artists,
        folders,
    })
}

/// 多选媒体选择器
///
/// 选中顺序即下游展示顺序。只有 [`commit`](Self::commit) 会向宿主
/// 产出结果；`cancel` 丢弃会话内的全部暂存修改。
pub struct MultiMediaPicker<B> {
    backend: B,
    auth: AuthContext,
    options: PickerOptions,
    state: SessionState,
    selection: MultiSelection,
}

impl<B: MediaBackend> MultiMediaPicker<B> {
    pub fn new(backend: B, auth: AuthContext, options: PickerOptions) -> Self {
        Self {
            backend,
            auth,
            options,
            state: SessionState::default(),
            selection: MultiSelection::new(),
        }
    }

    /// 打开会话：重置临时状态并用宿主当前值初始化选择
    pub fn begin_open(&mut self, current: &[String]) {
        self.state.reset(&self.options);
        self.selection.seed(current);
    }

    /// 抓取快照（不修改会话状态，宿主可与 `complete_open` 拆开驱动）
    pub async fn fetch(&self) -> AppResult<CatalogSnapshot> {
        fetch_snapshot(&self.backend, &self.auth, &self.options).await
    }

    /// 安装抓取结果；会话在抓取期间被关闭时丢弃
    pub fn complete_open(&mut self, result: AppResult<CatalogSnapshot>) -> AppResult<()> {
        self.state.install(result)
    }

    /// 便捷方法：按序执行 begin_open / fetch / complete_open
    pub async fn open(&mut self, current: &[String]) -> AppResult<()> {
        self.begin_open(current);
        let result = self.fetch().await;
        self.complete_open(result)
    }

    /// 提交：按快照解析选择并关闭会话
    ///
    /// 解析失败的 ID 静默丢弃。会话未打开时返回空提交。
    pub fn commit(&mut self) -> MultiCommit {
        if !self.state.open {
            return MultiCommit::default();
        }
        self.state.open = false;
        self.selection.resolve(&self.state.catalog)
    }

    /// 取消：关闭会话，丢弃全部暂存修改，不产出任何结果
    pub fn cancel(&mut self) {
        self.state.open = false;
        self.state.loading = false;
    }

    /// 切换一项的选中状态
    pub fn toggle(&mut self, id: &str) -> ToggleResult {
        self.selection.toggle(id)
    }

    /// 选中当前可见的全部条目，返回新增数量
    pub fn select_all_visible(&mut self) -> usize {
        let visible_ids: Vec<String> = self.state.visible().iter().map(|m| m.id.clone()).collect();
        self.selection.select_all(visible_ids)
    }

    /// 一键选中本次会话上传的全部条目，返回新增数量
    pub fn select_session_uploads(&mut self) -> usize {
        let ids: Vec<String> = self.state.session_uploads.clone();
        self.selection.select_all(ids)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &MultiSelection {
        &self.selection
    }

    /// 条目在选中顺序中的序号（1 起，供角标展示）
    pub fn selection_badge(&self, id: &str) -> Option<usize> {
        self.selection.position(id).map(|index| index + 1)
    }

    /// 顺序上传一批文件
    ///
    /// 每个文件独立成败：成功则前插快照、追加到选择并记入会话上传；
    /// 失败则记录日志后继续下一个。批次结束后若设有上传目标艺术家，
    /// 艺术家过滤切换到该目标。会话未打开或上一批未完成时整批忽略。
    pub async fn upload_batch(&mut self, files: Vec<UploadRequest>) -> UploadBatchResult {
        let mut result = UploadBatchResult::default();
        if !self.state.may_upload() {
            return result;
        }

        self.state.uploading = true;
        for file in files {
            let request = self.state.tag_upload(file);
            match self.backend.upload_media(&self.auth, &request).await {
                Ok(media) => {
                    self.state.record_upload(&media);
                    if !self.selection.contains(&media.id) {
                        self.selection.toggle(&media.id);
                    }
                    result.uploaded.push(media.id);
                }
                Err(error) => {
                    tracing::error!(filename = %request.filename, error = %error, "上传失败，继续批内其余文件");
                    result.failures.push(UploadFailure {
                        filename: request.filename,
                        error,
                    });
                }
            }
        }
        self.state.finish_upload_batch();
        result
    }

    /// 更新一条媒体并回写到快照
    pub async fn update_item(&mut self, id: &str, patch: &MediaPatch) -> AppResult<Media> {
        let updated = self.backend.update_media(&self.auth, id, patch).await?;
        self.state.catalog.apply_update(updated.clone());
        Ok(updated)
    }

    /// 删除一条媒体，并从快照与选择中移除
    pub async fn delete_item(&mut self, id: &str) -> AppResult<()> {
        self.backend.delete_media(&self.auth, id).await?;
        self.state.catalog.remove(id);
        self.selection.remove(id);
        self.state.session_uploads.retain(|s| s != id);
        Ok(())
    }

    // ==================== 过滤与展示 ====================

    pub fn visible(&self) -> Vec<&Media> {
        self.state.visible()
    }

    pub fn grid_state(&self) -> GridState {
        self.state.grid_state()
    }

    pub fn set_date_filter(&mut self, date: DateFilter) {
        self.state.filters.date = date;
    }

    pub fn set_artist_filter(&mut self, artist_id: Option<String>) {
        self.state.filters.artist_id = artist_id;
    }

    pub fn set_sort(&mut self, sort: MediaSort) {
        self.state.sort = sort;
    }

    pub fn set_upload_artist(&mut self, artist_id: Option<String>) {
        self.state.upload_artist_id = artist_id;
    }

    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    pub fn sort(&self) -> MediaSort {
        self.state.sort
    }

    pub fn artists(&self) -> &[Artist] {
        &self.state.artists
    }

    pub fn folders(&self) -> &[String] {
        &self.state.folders
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.state.uploading
    }

    /// 是否为本次会话内上传的条目（“新”角标）
    pub fn is_session_upload(&self, id: &str) -> bool {
        self.state.session_uploads.iter().any(|s| s == id)
    }

    pub fn session_uploads(&self) -> &[String] {
        &self.state.session_uploads
    }
}

/// 单选媒体选择器
///
/// 最多选中一项；重复点击当前选中项为空操作，清空需显式调用
/// [`clear_selection`](Self::clear_selection)。
pub struct MediaPicker<B> {
    backend: B,
    auth: AuthContext,
    options: PickerOptions,
    state: SessionState,
    selection: SingleSelection,
}

impl<B: MediaBackend> MediaPicker<B> {
    pub fn new(backend: B, auth: AuthContext, options: PickerOptions) -> Self {
        Self {
            backend,
            auth,
            options,
            state: SessionState::default(),
            selection: SingleSelection::new(),
        }
    }

    /// 打开会话：重置临时状态并用宿主当前值初始化选择
    pub fn begin_open(&mut self, current: Option<String>) {
        self.state.reset(&self.options);
        self.selection.seed(current);
    }

    /// 抓取快照（不修改会话状态）
    pub async fn fetch(&self) -> AppResult<CatalogSnapshot> {
        fetch_snapshot(&self.backend, &self.auth, &self.options).await
    }

    /// 安装抓取结果；会话在抓取期间被关闭时丢弃
    pub fn complete_open(&mut self, result: AppResult<CatalogSnapshot>) -> AppResult<()> {
        self.state.install(result)
    }

    /// 便捷方法：按序执行 begin_open / fetch / complete_open
    pub async fn open(&mut self, current: Option<String>) -> AppResult<()> {
        self.begin_open(current);
        let result = self.fetch().await;
        self.complete_open(result)
    }

    /// 提交：解析选中项并关闭会话
    pub fn commit(&mut self) -> SingleCommit {
        if !self.state.open {
            return SingleCommit::default();
        }
        self.state.open = false;
        self.selection.resolve(&self.state.catalog)
    }

    /// 取消：关闭会话，丢弃暂存修改
    pub fn cancel(&mut self) {
        self.state.open = false;
        self.state.loading = false;
    }

    /// 选中一项；重复点击当前选中项为空操作
    pub fn select(&mut self, id: &str) -> SelectOutcome {
        self.selection.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.id()
    }

    /// 顺序上传一批文件；每个成功的文件都会成为当前选中项
    pub async fn upload_batch(&mut self, files: Vec<UploadRequest>) -> UploadBatchResult {
        let mut result = UploadBatchResult::default();
        if !self.state.may_upload() {
            return result;
        }

        self.state.uploading = true;
        for file in files {
            let request = self.state.tag_upload(file);
            match self.backend.upload_media(&self.auth, &request).await {
                Ok(media) => {
                    self.state.record_upload(&media);
                    self.selection.select(&media.id);
                    result.uploaded.push(media.id);
                }
                Err(error) => {
                    tracing::error!(filename = %request.filename, error = %error, "上传失败，继续批内其余文件");
                    result.failures.push(UploadFailure {
                        filename: request.filename,
                        error,
                    });
                }
            }
        }
        self.state.finish_upload_batch();
        result
    }

    // ==================== 过滤与展示 ====================

    pub fn visible(&self) -> Vec<&Media> {
        self.state.visible()
    }

    pub fn grid_state(&self) -> GridState {
        self.state.grid_state()
    }

    pub fn set_date_filter(&mut self, date: DateFilter) {
        self.state.filters.date = date;
    }

    pub fn set_artist_filter(&mut self, artist_id: Option<String>) {
        self.state.filters.artist_id = artist_id;
    }

    pub fn set_sort(&mut self, sort: MediaSort) {
        self.state.sort = sort;
    }

    pub fn set_upload_artist(&mut self, artist_id: Option<String>) {
        self.state.upload_artist_id = artist_id;
    }

    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    pub fn artists(&self) -> &[Artist] {
        &self.state.artists
    }

    pub fn folders(&self) -> &[String] {
        &self.state.folders
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.state.uploading
    }

    pub fn is_session_upload(&self, id: &str) -> bool {
        self.state.session_uploads.iter().any(|s| s == id)
    }
}
